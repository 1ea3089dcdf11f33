/// Exit code for failures before the server accepts requests, to tell them
/// apart from crashes while serving
pub const EXIT_STARTUP_FAILURE: i32 = 2;
