use crate::extract::ExtractedContent;
use crate::fetch::FetchResult;
use std::fmt::Write as _;

pub const FAILURE_PREFIX: &str = "Transport error: ";

/// The raw body on success, one prefixed line on failure.
pub fn render_result(result: &FetchResult) -> String {
    match result {
        FetchResult::Success { body, .. } => body.clone(),
        FetchResult::Failure { message } => format!("{}{}", FAILURE_PREFIX, message),
    }
}

pub fn render_extracted(content: &ExtractedContent) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Content:");
    let _ = writeln!(out, "{}\n", content.main_text);
    let _ = writeln!(out, "Headings:");
    for (index, heading) in content.headings.iter().enumerate() {
        let _ = writeln!(out, "{}. {}", index + 1, heading);
    }
    out
}
