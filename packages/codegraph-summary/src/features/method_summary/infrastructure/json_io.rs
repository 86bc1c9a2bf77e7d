//! JSON summary documents
//!
//! One document per method:
//!
//! ```json
//! {
//!   "version": 1,
//!   "method": "<Foo: java.lang.Object bar(java.lang.String)>",
//!   "gaps": [{ "id": 0, "signature": "<Lib: java.lang.Object get(int)>" }],
//!   "flows": [{ "source": { "flow_type": "Parameter", ... }, "sink": { ... } }]
//! }
//! ```
//!
//! Output is deterministic: gaps ordered by id, flows sorted by their
//! attributes.

use serde::{Deserialize, Serialize};
use std::io::{Read, Write};
use tracing::{trace, warn};

use crate::config::{AccessPathLimit, ValidatedConfig};
use crate::errors::{SummaryError, SummaryResult};
use crate::features::method_summary::domain::{
    EndpointAttributes, FlowEndpoint, GapDefinition, MethodSummaries,
};
use crate::features::method_summary::ports::{SummaryReader, SummaryWriter};

/// Document schema version
pub const SUMMARY_FORMAT_VERSION: u32 = 1;

/// Serialized form of one [`MethodSummaries`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryDocument {
    pub version: u32,
    pub method: String,
    #[serde(default)]
    pub gaps: Vec<GapDefinition>,
    #[serde(default)]
    pub flows: Vec<FlowRecord>,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FlowRecord {
    pub source: EndpointAttributes,
    pub sink: EndpointAttributes,
}

impl SummaryDocument {
    /// Export a summary.
    ///
    /// Fails with `UnsupportedFlowType` if any endpoint has no external form.
    pub fn from_summary(summary: &MethodSummaries) -> SummaryResult<Self> {
        let mut flows = summary
            .flows()
            .map(|flow| {
                Ok(FlowRecord {
                    source: flow.source().attributes()?,
                    sink: flow.sink().attributes()?,
                })
            })
            .collect::<SummaryResult<Vec<_>>>()?;
        flows.sort();

        Ok(Self {
            version: SUMMARY_FORMAT_VERSION,
            method: summary.method().to_string(),
            gaps: summary.gaps().cloned().collect(),
            flows,
        })
    }

    /// Rebuild the summary.
    ///
    /// Flows go through the normal reducing insert, so a document with
    /// redundant flows loads reduced. With `strict` set a flow naming an
    /// undeclared gap fails the whole document; otherwise the flow is skipped.
    pub fn into_summary(
        self,
        limit: AccessPathLimit,
        strict: bool,
    ) -> SummaryResult<MethodSummaries> {
        if self.version != SUMMARY_FORMAT_VERSION {
            return Err(SummaryError::serialization(format!(
                "unsupported summary format version {} (expected {})",
                self.version, SUMMARY_FORMAT_VERSION
            )));
        }

        let mut summary = MethodSummaries::new(self.method);
        for gap in self.gaps {
            summary.insert_gap(gap)?;
        }

        for record in self.flows {
            let source_gap = resolve_gap(&summary, &record.source);
            let sink_gap = resolve_gap(&summary, &record.sink);
            let (source_gap, sink_gap) = match (source_gap, sink_gap) {
                (Ok(s), Ok(k)) => (s, k),
                (Err(id), _) | (_, Err(id)) => {
                    if strict {
                        return Err(SummaryError::unresolved_gap(summary.method(), id));
                    }
                    warn!(
                        "{}: skipping flow with undeclared gap #{}",
                        summary.method(),
                        id
                    );
                    continue;
                }
            };

            let source = FlowEndpoint::from_attributes(&record.source, source_gap, limit)?;
            let sink = FlowEndpoint::from_attributes(&record.sink, sink_gap, limit)?;
            summary.insert_flow(source, sink)?;
        }

        trace!(
            "{}: loaded {} flow(s), {} gap(s)",
            summary.method(),
            summary.flow_count(),
            summary.gap_count()
        );
        Ok(summary)
    }
}

/// Gap definition an attribute set refers to, or the undeclared id
fn resolve_gap(
    summary: &MethodSummaries,
    attrs: &EndpointAttributes,
) -> Result<Option<GapDefinition>, u32> {
    match attrs.gap {
        None => Ok(None),
        Some(id) => summary.gap(id).cloned().map(Some).ok_or(id),
    }
}

/// Encode a summary as a compact JSON string
pub fn to_json_string(summary: &MethodSummaries) -> SummaryResult<String> {
    Ok(serde_json::to_string(&SummaryDocument::from_summary(summary)?)?)
}

/// Decode a summary from JSON text
pub fn from_json_str(json: &str, config: &ValidatedConfig) -> SummaryResult<MethodSummaries> {
    let doc: SummaryDocument = serde_json::from_str(json)?;
    doc.into_summary(config.access_path_limit(), config.strict_gap_references())
}

/// [`SummaryWriter`] producing one JSON document per call
pub struct JsonSummaryWriter<W: Write> {
    writer: W,
    pretty: bool,
}

impl<W: Write> JsonSummaryWriter<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            pretty: false,
        }
    }

    /// Indented output
    pub fn pretty(mut self) -> Self {
        self.pretty = true;
        self
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> SummaryWriter for JsonSummaryWriter<W> {
    fn write(&mut self, summary: &MethodSummaries) -> SummaryResult<()> {
        let doc = SummaryDocument::from_summary(summary)?;
        if self.pretty {
            serde_json::to_writer_pretty(&mut self.writer, &doc)?;
        } else {
            serde_json::to_writer(&mut self.writer, &doc)?;
        }
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

/// [`SummaryReader`] consuming a single JSON document
pub struct JsonSummaryReader<R: Read> {
    reader: R,
    limit: AccessPathLimit,
    strict: bool,
}

impl<R: Read> JsonSummaryReader<R> {
    pub fn new(reader: R, config: &ValidatedConfig) -> Self {
        Self {
            reader,
            limit: config.access_path_limit(),
            strict: config.strict_gap_references(),
        }
    }
}

impl<R: Read> SummaryReader for JsonSummaryReader<R> {
    fn read(&mut self) -> SummaryResult<MethodSummaries> {
        let doc: SummaryDocument = serde_json::from_reader(&mut self.reader)?;
        doc.into_summary(self.limit, self.strict)
    }
}
