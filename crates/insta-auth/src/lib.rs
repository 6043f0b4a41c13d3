use std::fmt;
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::info;

pub mod cache;
pub mod error;

pub use error::{Error, Result};

/// Default path of the client credentials file
pub const SECRET_FILE_PATH: &str = "./secret.json";
/// Default path of the cached authorization code
pub const CODE_FILE_PATH: &str = "./code_file";
/// Instagram API host
pub const INSTAGRAM_API: &str = "https://api.instagram.com";
/// Authorization endpoint, relative to the API host
pub const INSTAGRAM_AUTH: &str = "/oauth/authorize/";
/// Permissions requested during authorization
pub const SCOPE: &str = "basic+public_content+comments";

/// Client credentials read from `secret.json`
#[derive(Clone, Deserialize)]
pub struct Credentials {
    /// OAuth client ID
    pub client_id: String,
    /// OAuth client secret. Loaded with the rest of the file but not used
    /// when only the authorization code is requested.
    pub client_secret: String,
    /// Redirect URI registered for the client
    pub redirect_uri: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("redirect_uri", &self.redirect_uri)
            .finish()
    }
}

impl Credentials {
    /// Load credentials from a JSON file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::SecretRead {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| Error::SecretDecode {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Everything the code flow needs besides the credentials themselves
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Path of the JSON file holding the client credentials
    pub secret_path: PathBuf,
    /// Path of the file caching the authorization code
    pub code_path: PathBuf,
    /// API host the authorization URL points at
    pub api_host: String,
    /// Authorization endpoint, relative to `api_host`
    pub auth_path: String,
    /// OAuth scope(s), already joined with `+`
    pub scope: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            secret_path: PathBuf::from(SECRET_FILE_PATH),
            code_path: PathBuf::from(CODE_FILE_PATH),
            api_host: INSTAGRAM_API.to_string(),
            auth_path: INSTAGRAM_AUTH.to_string(),
            scope: SCOPE.to_string(),
        }
    }
}

/// Generate authorization URL
///
/// Values are substituted as-is: a client ID or redirect URI containing
/// `&`, `#` or spaces produces a broken URL.
pub fn auth_url(settings: &Settings, credentials: &Credentials) -> String {
    format!(
        "{}{}?\
        client_id={}&\
        redirect_uri={}&\
        response_type=code&\
        scope={}",
        settings.api_host,
        settings.auth_path,
        credentials.client_id,
        credentials.redirect_uri,
        settings.scope,
    )
}

/// Show the authorization URL and read the pasted code from `input`
pub fn code_from_console<R, W>(auth_url: &str, input: &mut R, prompt: &mut W) -> Result<String>
where
    R: BufRead,
    W: Write,
{
    writeln!(prompt, "Please, insert this URL in your browser:\n\t{}", auth_url)
        .map_err(Error::Console)?;
    writeln!(prompt, "Paste the code").map_err(Error::Console)?;
    prompt.flush().map_err(Error::Console)?;

    let mut line = String::new();
    let read = input.read_line(&mut line).map_err(Error::Console)?;
    if read == 0 {
        return Err(Error::Console(std::io::Error::new(
            std::io::ErrorKind::UnexpectedEof,
            "input closed before a code was pasted",
        )));
    }

    Ok(cache::strip_line_ending(&line).to_string())
}

/// Options for a single [`get_code`] run
#[derive(Debug, Clone, Copy, Default)]
pub struct Flow {
    /// Ignore any cached code and go through the console flow again
    pub refresh: bool,
}

/// Get an authorization code, from the cache file if possible, otherwise by
/// asking the operator, and save it to the cache file
pub fn get_code<R, W>(
    settings: &Settings,
    credentials: &Credentials,
    flow: Flow,
    input: &mut R,
    prompt: &mut W,
) -> Result<String>
where
    R: BufRead,
    W: Write,
{
    let cached = if flow.refresh {
        info!("Ignoring cached code, requesting a new one");
        None
    } else {
        cache::read_code(&settings.code_path)
    };

    let code = match cached {
        Some(code) => {
            info!("Using cached code from '{}'", settings.code_path.display());
            code
        }
        None => {
            let url = auth_url(settings, credentials);
            code_from_console(&url, input, prompt)?
        }
    };

    cache::save_code(&settings.code_path, &code)?;
    Ok(code)
}

/// Load credentials and get a code, writing it as the only line of `output`
pub fn run<R, W, O>(
    settings: &Settings,
    flow: Flow,
    input: &mut R,
    prompt: &mut W,
    output: &mut O,
) -> Result<String>
where
    R: BufRead,
    W: Write,
    O: Write,
{
    let credentials = Credentials::load_from_file(&settings.secret_path)?;
    let code = get_code(settings, &credentials, flow, input, prompt)?;
    writeln!(output, "{}", code).map_err(Error::Output)?;
    Ok(code)
}
