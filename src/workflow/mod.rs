//! 流程层：终端里的答题页面和结果页面

pub mod results_view;
pub mod test_flow;

pub use results_view::{render_report, render_report_json};
pub use test_flow::{FlowOutcome, TestFlow};
