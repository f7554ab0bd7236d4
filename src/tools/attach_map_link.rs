use crate::annotate::AnnotationRequest;
use crate::error::Result;
use crate::message::ATTACH_MAP_LINK;
use crate::tools::{Tool, ToolContext, ToolResult};

/// Tool that pins candidate place names in the document.
///
/// Bad or empty content is not an error: the result is a success with zero pins.
#[derive(Default)]
pub struct AttachMapLinkTool;

impl Tool for AttachMapLinkTool {
    type Params = AnnotationRequest;

    fn name(&self) -> &str {
        ATTACH_MAP_LINK
    }

    fn execute_typed(&self, params: AnnotationRequest, context: &mut ToolContext<'_>) -> Result<ToolResult> {
        let report = context.annotator.annotate(context.document, &params);

        let keys: Vec<&str> = report.pins.iter().map(|pin| pin.key.as_str()).collect();
        let result = ToolResult::success_with(serde_json::json!({
            "pins": report.pin_count(),
            "keys": keys,
            "elements_scanned": report.elements_scanned,
            "elements_skipped": report.elements_skipped
        }));

        context.pins.extend(report.pins);
        Ok(result)
    }
}
