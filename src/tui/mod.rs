pub mod progress_display;
