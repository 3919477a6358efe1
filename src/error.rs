/// Fatal pipeline error carrying the process exit code.
///
/// Exit codes: 2 = filesystem/archive, 3 = data (XML, dates, catalog),
/// 4 = network.
#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    /// Filesystem or archive failure.
    pub fn fs(message: impl Into<String>) -> Self {
        Self::new(2, message)
    }

    /// Malformed or missing registry data.
    pub fn data(message: impl Into<String>) -> Self {
        Self::new(3, message)
    }

    /// Transport-level failure.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(4, message)
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::fmt::Debug for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
