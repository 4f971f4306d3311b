//! Document selection types.
//!
//! The parser configuration is a tagged union carrying the per-category
//! sub-mode, so an invalid (category, configuration) pair cannot be
//! constructed in the first place.

use serde::{Deserialize, Serialize};

/// Document category, one per parser endpoint family.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DocumentCategory {
    FloorPlan,
    GanttChart,
    BillOfQuantities,
}

/// Extraction variant for floor plans. The serialized form doubles as the
/// endpoint path segment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum FloorPlanParser {
    #[serde(rename = "titleblock-hybrid")]
    TitleblockHybrid,
    #[serde(rename = "rooms-deterministic")]
    RoomsDeterministic,
    #[serde(rename = "rooms-ai")]
    RoomsAi,
    #[serde(rename = "full-plan-ai")]
    FullPlanAi,
}

impl FloorPlanParser {
    pub fn path_segment(&self) -> &'static str {
        match self {
            Self::TitleblockHybrid => "titleblock-hybrid",
            Self::RoomsDeterministic => "rooms-deterministic",
            Self::RoomsAi => "rooms-ai",
            Self::FullPlanAi => "full-plan-ai",
        }
    }
}

/// Extraction variant for Gantt charts: read the bars, or read the date table.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum GanttFormat {
    Visual,
    Tabular,
}

impl GanttFormat {
    pub fn path_segment(&self) -> &'static str {
        match self {
            Self::Visual => "visual",
            Self::Tabular => "tabular",
        }
    }
}

/// Selected extraction variant. Bills of quantities have no sub-mode.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ParserConfig {
    FloorPlan(FloorPlanParser),
    GanttChart(GanttFormat),
    BillOfQuantities,
}

impl ParserConfig {
    pub fn category(&self) -> DocumentCategory {
        match self {
            Self::FloorPlan(_) => DocumentCategory::FloorPlan,
            Self::GanttChart(_) => DocumentCategory::GanttChart,
            Self::BillOfQuantities => DocumentCategory::BillOfQuantities,
        }
    }

    /// Default variant when a category is first selected.
    pub fn default_for(category: DocumentCategory) -> Self {
        match category {
            DocumentCategory::FloorPlan => Self::FloorPlan(FloorPlanParser::TitleblockHybrid),
            DocumentCategory::GanttChart => Self::GanttChart(GanttFormat::Visual),
            DocumentCategory::BillOfQuantities => Self::BillOfQuantities,
        }
    }

    /// Advisory MIME filter for the file picker. This is a hint, not an
    /// enforced invariant: a file of another type is submitted as-is and any
    /// rejection comes back through the service's error response.
    pub fn accepted_mime_types(&self) -> &'static [&'static str] {
        match self {
            Self::FloorPlan(FloorPlanParser::RoomsDeterministic) => &["application/pdf"],
            Self::FloorPlan(_) => &["image/*", "application/pdf"],
            Self::GanttChart(_) => &["application/pdf"],
            Self::BillOfQuantities => &["application/pdf", "image/*"],
        }
    }
}

/// A file chosen for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub name: String,
    pub bytes: Vec<u8>,
    pub content_type: String,
}

impl FileUpload {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>, content_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bytes,
            content_type: content_type.into(),
        }
    }
}

/// Current selection: the file (if any) and the extraction variant.
#[derive(Debug, Clone, PartialEq)]
pub struct UploadSelection {
    pub file: Option<FileUpload>,
    pub config: ParserConfig,
}

impl Default for UploadSelection {
    fn default() -> Self {
        Self {
            file: None,
            config: ParserConfig::default_for(DocumentCategory::FloorPlan),
        }
    }
}
