use std::fmt;

const PROTOCOL: &str = "http";
const LOCALHOST: &str = "localhost";

/// HTTP location of the pdf2zh web UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceEndpoint {
    host: String,
    port: u16,
}

impl ServiceEndpoint {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// `http://localhost:<port>/`, where pdf2zh serves its UI.
    pub fn localhost(port: u16) -> Self {
        Self::new(LOCALHOST, port)
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn url(&self) -> String {
        format!("{PROTOCOL}://{}:{}/", self.host, self.port)
    }
}

impl fmt::Display for ServiceEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url())
    }
}
