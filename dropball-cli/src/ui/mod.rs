pub mod watch_view;
