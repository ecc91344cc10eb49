//! egui rendering: side panel filters, top bar and the two count charts.

pub mod charts;
pub mod panels;
