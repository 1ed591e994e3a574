//! studyplan-report — Rendering of study plan reports.

pub mod html;
