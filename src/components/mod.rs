mod app;
mod dashboards;
mod login_screen;
mod register_screen;
mod unauthorized;

pub use app::App;
