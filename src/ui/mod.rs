pub mod icons;
pub mod report;

pub use report::{
    display_follow_ups, display_leads, display_rollup, display_stages, display_summary,
    render_leads, render_rollup, render_stages, render_summary,
};
