//! User-facing output

mod report;

pub use report::{
    format_details, format_error, format_suggestion, format_summary, print_error, print_summary,
    suggestion, PREFIX,
};
