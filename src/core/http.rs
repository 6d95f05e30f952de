// src/core/http.rs
// Blocking HTTP session against the live site (ureq + cookie jar).
//
// Login walks the SSO flow a browser would: the schedule URL redirects to the
// identity provider's form, credentials are posted there, and the provider
// answers with an auto-submitting form that carries the assertion back.

use std::{fmt, fs, path::Path, time::Duration};

use log::{debug, info};
use url::Url;

use super::html::{self, HtmlForm};
use super::session::{Endpoints, Session};
use crate::config::{SiteSettings, consts::USER_AGENT};
use crate::error::{ConfigError, SessionError};

const USER_FIELD: &str = "j_username";
const PASS_FIELD: &str = "j_password";
const PROCEED_FIELD: &str = "_eventId_proceed";

#[derive(Clone)]
pub struct Credentials {
    pub user: String,
    password: String,
}

impl Credentials {
    pub fn new(user: impl Into<String>, password: impl Into<String>) -> Self {
        Self { user: user.into(), password: password.into() }
    }

    /// Two-line secret file: user name, then password.
    pub fn from_secret_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut lines = text.lines();
        let user = lines.next().map(str::trim).filter(|u| !u.is_empty());
        let password = lines.next();
        match (user, password) {
            (Some(user), Some(password)) => Ok(Self::new(user, password)),
            _ => Err(ConfigError::Invalid(format!(
                "{}: expected user on line 1 and password on line 2",
                path.display()
            ))),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .finish()
    }
}

pub struct HttpSession {
    agent: ureq::Agent,
    endpoints: Endpoints,
    credentials: Credentials,
    logged_in: bool,
}

impl HttpSession {
    pub fn new(site: &SiteSettings, credentials: Credentials) -> Self {
        let agent = ureq::AgentBuilder::new()
            .timeout(Duration::from_secs(site.timeout_secs))
            .user_agent(USER_AGENT)
            .build();
        Self {
            agent,
            endpoints: Endpoints::from_settings(site),
            credentials,
            logged_in: false,
        }
    }

    fn ensure_login(&mut self) -> Result<(), SessionError> {
        if self.logged_in { Ok(()) } else { self.login() }
    }

    fn get(&self, url: &str) -> Result<(String, String), SessionError> {
        let resp = self.agent.get(url).call().map_err(|e| session_error(url, e))?;
        let final_url = s!(resp.get_url());
        Ok((final_url, resp.into_string()?))
    }

    fn post(&self, url: &str, fields: &[(&str, &str)]) -> Result<(String, String), SessionError> {
        let resp = self.agent.post(url).send_form(fields).map_err(|e| session_error(url, e))?;
        let final_url = s!(resp.get_url());
        Ok((final_url, resp.into_string()?))
    }

    fn post_form(&self, base: &str, form: &HtmlForm) -> Result<(String, String), SessionError> {
        let target = resolve_url(base, &form.action)?;
        let fields: Vec<(&str, &str)> = form
            .fields
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        self.post(&target, &fields)
    }
}

impl Session for HttpSession {
    fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    fn login(&mut self) -> Result<(), SessionError> {
        let (login_url, body) = self.get(&self.endpoints.schedule_url)?;
        if !has_login_form(&body) {
            debug!("No login form at {login_url}; session already authenticated");
            self.logged_in = true;
            return Ok(());
        }

        let form = html::first_form(&body)
            .ok_or_else(|| SessionError::Login(s!("login form not found")))?;
        let target = resolve_url(&login_url, &form.action)?;
        let (mut at, mut body) = self.post(
            &target,
            &[
                (USER_FIELD, self.credentials.user.as_str()),
                (PASS_FIELD, self.credentials.password.as_str()),
                (PROCEED_FIELD, ""),
            ],
        )?;

        if has_login_form(&body) {
            return Err(SessionError::Login(s!("credentials rejected")));
        }

        // Assertion hand-off back to the site.
        if let Some(form) = html::first_form(&body).filter(|f| {
            f.fields.iter().any(|(name, _)| name == "SAMLResponse")
        }) {
            (at, body) = self.post_form(&at, &form)?;
        }
        if has_login_form(&body) {
            return Err(SessionError::Login(format!("still at login page ({at})")));
        }

        info!("Logged in as {}", self.credentials.user);
        self.logged_in = true;
        Ok(())
    }

    fn fetch_html(&mut self, url: &str) -> Result<String, SessionError> {
        self.ensure_login()?;
        debug!("GET {url}");
        self.get(url).map(|(_, body)| body)
    }

    fn submit_form(&mut self, url: &str, fields: &[(&str, &str)]) -> Result<String, SessionError> {
        self.ensure_login()?;
        debug!("POST {url}");
        self.post(url, fields).map(|(_, body)| body)
    }

    fn close(&mut self) -> Result<(), SessionError> {
        self.logged_in = false;
        Ok(())
    }
}

fn has_login_form(body: &str) -> bool {
    html::attr_values_ci(body, "name").iter().any(|n| n == USER_FIELD)
}

fn session_error(url: &str, err: ureq::Error) -> SessionError {
    match err {
        ureq::Error::Status(status, _) => SessionError::Status { status, url: s!(url) },
        ureq::Error::Transport(t) => SessionError::Transport(t.to_string()),
    }
}

/// Resolve a form action against the page it came from.
fn resolve_url(base: &str, action: &str) -> Result<String, SessionError> {
    let base = Url::parse(base).map_err(|e| SessionError::Login(format!("bad page URL {base}: {e}")))?;
    let target = base
        .join(action)
        .map_err(|e| SessionError::Login(format!("bad form action {action}: {e}")))?;
    Ok(target.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_form_actions() {
        let base = "https://login.example.edu/idp/profile/SAML2/Redirect/SSO?execution=e1s1";
        let r = |action: &str| resolve_url(base, action).unwrap();
        assert_eq!(r(""), base);
        assert_eq!(
            r("/idp/profile/SAML2/Redirect/SSO?execution=e1s2"),
            "https://login.example.edu/idp/profile/SAML2/Redirect/SSO?execution=e1s2"
        );
        assert_eq!(
            r("SSO?execution=e1s2"),
            "https://login.example.edu/idp/profile/SAML2/Redirect/SSO?execution=e1s2"
        );
        assert_eq!(r("https://sp.example.edu/acs"), "https://sp.example.edu/acs");
        assert_eq!(resolve_url("https://host", "next").unwrap(), "https://host/next");
    }

    #[test]
    fn query_only_action_keeps_the_path() {
        let base = "https://login.example.edu/idp/profile/SAML2/Redirect/SSO?execution=e1s1";
        assert_eq!(
            resolve_url(base, "?execution=e1s2").unwrap(),
            "https://login.example.edu/idp/profile/SAML2/Redirect/SSO?execution=e1s2"
        );
    }

    #[test]
    fn protocol_relative_action_switches_host() {
        let base = "https://acme.wisc.edu/tools/schedule/schedule.php";
        assert_eq!(resolve_url(base, "//idp.wisc.edu/sso").unwrap(), "https://idp.wisc.edu/sso");
    }

    #[test]
    fn dot_dot_segments_are_removed() {
        let base = "https://acme.wisc.edu/tools/schedule/schedule.php";
        assert_eq!(
            resolve_url(base, "../staff/index.php").unwrap(),
            "https://acme.wisc.edu/tools/staff/index.php"
        );
    }

    #[test]
    fn unparseable_base_is_a_login_error() {
        assert!(matches!(resolve_url("not a url", "next"), Err(SessionError::Login(_))));
    }

    #[test]
    fn credentials_debug_hides_password() {
        let c = Credentials::new("bucky", "hunter2");
        let shown = format!("{c:?}");
        assert!(shown.contains("bucky"));
        assert!(!shown.contains("hunter2"));
    }

    #[test]
    fn detects_login_form() {
        assert!(has_login_form(r#"<input type="text" NAME="j_username">"#));
        assert!(has_login_form("<input type='text' name='j_username'>"));
        assert!(has_login_form("<input type=text name=j_username>"));
        assert!(!has_login_form("<p>name=\"j_username\"</p>"));
        assert!(!has_login_form("<table id=\"sch_table_verticle\"></table>"));
    }
}
