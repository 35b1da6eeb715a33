//! # CLI
//!
//! Command-line driver that mounts the page against a live backend and
//! prints the rendered view.

use crate::api::HttpMentorshipApi;
use crate::config::{ClientConfig, DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS};
use crate::error::CliError;
use crate::notify::ConsoleNotifier;
use crate::page::MentorshipPage;
use chrono::Utc;
use clap::{Parser, Subcommand};
use mentorship_core::{tenure, AuthenticatedUser, PageView, RequestForm, StaticAuth, Tab};
use std::time::Duration;
use tracing::debug;

/// The page as the CLI drives it.
pub type CliPage = MentorshipPage<HttpMentorshipApi, StaticAuth, ConsoleNotifier>;

#[derive(Debug, Parser)]
#[command(name = "mentorship-hub", version, about = "Browse mentors and request mentorship")]
pub struct Cli {
    /// Backend base URL
    #[arg(long, env = "MENTORSHIP_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Bearer token for the backend
    #[arg(long, env = "MENTORSHIP_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, env = "MENTORSHIP_API_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Employee id of the logged-in user
    #[arg(long, env = "MENTORSHIP_EMPLOYEE_ID")]
    pub employee_id: Option<String>,

    /// Display name of the logged-in user
    #[arg(long, env = "MENTORSHIP_USER_NAME")]
    pub name: Option<String>,

    /// Email of the logged-in user
    #[arg(long, env = "MENTORSHIP_USER_EMAIL")]
    pub email: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load the hub and print it
    Show {
        /// Tab to open (discover, my-requests, my-mentors, mentor-dashboard, register)
        #[arg(long)]
        tab: Option<Tab>,
    },
    /// Send a mentorship request to a mentor from the discover list
    Request {
        /// Position of the mentor in the discover list
        #[arg(long)]
        mentor: usize,
        #[arg(long)]
        goals: String,
        #[arg(long, default_value = "")]
        message: String,
        #[arg(long)]
        frequency: String,
        #[arg(long = "preferred-time")]
        preferred_time: String,
    },
    /// Print whole tenure years for a date
    Tenure { date: String },
}

impl Cli {
    /// Client configuration from the global flags.
    pub fn client_config(&self) -> ClientConfig {
        let config = ClientConfig::new(self.api_url.as_str())
            .with_timeout(Duration::from_secs(self.timeout_secs));
        match &self.api_key {
            Some(key) => config.with_api_key(key.as_str()),
            None => config,
        }
    }

    /// The session described by the identity flags.
    ///
    /// Any identity flag makes the session authenticated; without
    /// `--employee-id` the page shows the contact-support message.
    pub fn auth(&self) -> StaticAuth {
        if self.employee_id.is_none() && self.name.is_none() && self.email.is_none() {
            return StaticAuth::anonymous();
        }
        let mut user = match &self.employee_id {
            Some(id) => AuthenticatedUser::new(id.as_str()),
            None => AuthenticatedUser::without_employee_id(),
        };
        if let Some(name) = &self.name {
            user = user.with_name(name.as_str());
        }
        if let Some(email) = &self.email {
            user = user.with_email(email.as_str());
        }
        StaticAuth::logged_in(user)
    }
}

/// Run the parsed command.
pub async fn run(cli: Cli) -> Result<(), CliError> {
    if let Command::Tenure { date } = &cli.command {
        return cmd_tenure(date);
    }

    let api = HttpMentorshipApi::new(&cli.client_config())?;
    debug!(api_url = api.base_url(), "Mounting mentorship page");
    let mut page = MentorshipPage::new(api, cli.auth(), ConsoleNotifier);
    page.mount().await;

    match cli.command {
        Command::Show { tab } => cmd_show(&mut page, tab),
        Command::Request {
            mentor,
            goals,
            message,
            frequency,
            preferred_time,
        } => {
            let form = RequestForm {
                goals,
                message,
                frequency,
                preferred_time,
            };
            cmd_request(&mut page, mentor, form).await
        }
        Command::Tenure { .. } => Ok(()),
    }
}

/// Print the mounted page, optionally switching tab first.
pub fn cmd_show(page: &mut CliPage, tab: Option<Tab>) -> Result<(), CliError> {
    if let Some(tab) = tab {
        if matches!(page.view(), PageView::Hub(_)) {
            page.select_tab(tab)?;
        }
    }
    print!("{}", page.view().to_text());
    Ok(())
}

/// Select the mentor at `index` and submit the request form.
pub async fn cmd_request(
    page: &mut CliPage,
    index: usize,
    form: RequestForm,
) -> Result<(), CliError> {
    if !matches!(page.view(), PageView::Hub(_)) {
        print!("{}", page.view().to_text());
        return Err(CliError::Usage("the hub is not available".into()));
    }
    page.open_request(index)?;
    let sent = page.handle_request_mentorship(form).await;
    print!("{}", page.view().to_text());
    if sent {
        Ok(())
    } else {
        Err(CliError::Usage("mentorship request was not sent".into()))
    }
}

/// Print the tenure for a date string.
pub fn cmd_tenure(date: &str) -> Result<(), CliError> {
    if tenure::parse_reference_date(date).is_none() {
        return Err(CliError::Usage(format!("unrecognised date '{}'", date)));
    }
    println!("{}", tenure::compute_years(Some(date), Utc::now()));
    Ok(())
}
