//! Endpoint routing for the parser service.
//!
//! Pure mapping from the selected extraction variant to a request target.
//! The trailing-slash asymmetry between the three families is the backend's
//! observed routing contract and must be preserved verbatim: the drawing and
//! financial endpoints require the slash, the gantt endpoint rejects it.

use crate::domain::ParserConfig;

/// A routed request target, relative to the configured base URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    path: String,
    trailing_slash: bool,
}

impl Endpoint {
    /// Full request path, with the trailing slash applied where the backend
    /// requires one.
    pub fn request_path(&self) -> String {
        if self.trailing_slash {
            format!("{}/", self.path)
        } else {
            self.path.clone()
        }
    }

    pub fn requires_trailing_slash(&self) -> bool {
        self.trailing_slash
    }
}

/// Resolve the endpoint for an extraction variant. Dispatches exhaustively on
/// the tagged union, so a new category cannot fall through to a wrong branch.
pub fn route(config: &ParserConfig) -> Endpoint {
    match config {
        ParserConfig::FloorPlan(parser) => Endpoint {
            path: format!("/drawing_parser/{}", parser.path_segment()),
            trailing_slash: true,
        },
        ParserConfig::GanttChart(format) => Endpoint {
            path: format!("/gantt_parser/{}", format.path_segment()),
            trailing_slash: false,
        },
        ParserConfig::BillOfQuantities => Endpoint {
            path: "/financial_parser".to_string(),
            trailing_slash: true,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{FloorPlanParser, GanttFormat};

    #[test]
    fn floor_plan_paths_carry_trailing_slash() {
        let cases = [
            (FloorPlanParser::TitleblockHybrid, "/drawing_parser/titleblock-hybrid/"),
            (FloorPlanParser::RoomsDeterministic, "/drawing_parser/rooms-deterministic/"),
            (FloorPlanParser::RoomsAi, "/drawing_parser/rooms-ai/"),
            (FloorPlanParser::FullPlanAi, "/drawing_parser/full-plan-ai/"),
        ];
        for (parser, expected) in cases {
            let endpoint = route(&ParserConfig::FloorPlan(parser));
            assert_eq!(endpoint.request_path(), expected);
            assert!(endpoint.requires_trailing_slash());
        }
    }

    #[test]
    fn gantt_paths_have_no_trailing_slash() {
        let cases = [
            (GanttFormat::Visual, "/gantt_parser/visual"),
            (GanttFormat::Tabular, "/gantt_parser/tabular"),
        ];
        for (format, expected) in cases {
            let endpoint = route(&ParserConfig::GanttChart(format));
            assert_eq!(endpoint.request_path(), expected);
            assert!(!endpoint.requires_trailing_slash());
        }
    }

    #[test]
    fn financial_path_carries_trailing_slash() {
        let endpoint = route(&ParserConfig::BillOfQuantities);
        assert_eq!(endpoint.request_path(), "/financial_parser/");
        assert!(endpoint.requires_trailing_slash());
    }
}
