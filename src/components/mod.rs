//! UI Components
//!
//! Page views and the reusable pieces they share.

mod bar_chart;
mod breadcrumbs;
mod camera_modal;
mod chip_picker;
mod dashboard_view;
mod delete_confirm_button;
mod forms_view;
mod indicators_view;
mod library_view;
mod login_page;
mod projects_view;
mod reports_view;
mod sidebar;
mod task_modal;
mod toasts;

pub use bar_chart::BarChart;
pub use breadcrumbs::Breadcrumbs;
pub use camera_modal::CameraModal;
pub use chip_picker::ChipPicker;
pub use dashboard_view::DashboardView;
pub use delete_confirm_button::DeleteConfirmButton;
pub use forms_view::FormsView;
pub use indicators_view::IndicatorsView;
pub use library_view::LibraryView;
pub use login_page::LoginPage;
pub use projects_view::ProjectsView;
pub use reports_view::ReportsView;
pub use sidebar::Sidebar;
pub use task_modal::TaskModal;
pub use toasts::ToastContainer;
