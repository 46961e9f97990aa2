//! Dashboard
//!
//! Ties the filter engine to the chart renderer and describes the page
//! widgets. One `Dashboard` is built at startup and shared by every session.

mod dispatcher;
mod layout;

pub use dispatcher::{Dashboard, DashboardUpdate};
pub use layout::{
    DashboardLayout, DropdownOption, LayoutConfig, PayloadSlider, SiteDropdown, SliderMark,
};
