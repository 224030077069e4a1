//! Account table and detail rendering

use std::fmt::Write as _;

use super::{fit, OutputFormat, RenderError};
use crate::views::{AccountDetail, AccountRow, AccountsView, ViewState};

/// Shown while the account list is being fetched
pub const ACCOUNTS_LOADING: &str = "Loading accounts...";

/// Shown when the backend has no accounts
pub const NO_ACCOUNTS: &str = "No accounts found.";

const NAME_WIDTH: usize = 24;
const EMAIL_WIDTH: usize = 30;
const ROLE_WIDTH: usize = 10;
const STATUS_WIDTH: usize = 8;

/// Render the account listing in the requested format
pub fn render_accounts(view: &AccountsView, format: OutputFormat) -> Result<String, RenderError> {
    match format {
        OutputFormat::Table => Ok(render_table(view)),
        OutputFormat::Json => match &view.accounts {
            ViewState::Ready(_) | ViewState::Empty => Ok(serde_json::to_string_pretty(&view.rows())?),
            other => Ok(serde_json::to_string_pretty(&state_only(other))?),
        },
        OutputFormat::Csv => render_csv(&view.rows()),
    }
}

fn state_only<T>(state: &ViewState<T>) -> ViewState<()> {
    match state {
        ViewState::Loading => ViewState::Loading,
        ViewState::Failed(message) => ViewState::Failed(message.clone()),
        ViewState::Empty => ViewState::Empty,
        ViewState::Ready(_) => ViewState::Ready(()),
    }
}

fn render_table(view: &AccountsView) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Account Management");
    let _ = writeln!(out);

    match &view.accounts {
        ViewState::Loading => {
            let _ = writeln!(out, "{}", ACCOUNTS_LOADING);
        }
        ViewState::Failed(message) => {
            let _ = writeln!(out, "Error: {}", message);
        }
        ViewState::Empty => {
            let _ = writeln!(out, "{}", NO_ACCOUNTS);
        }
        ViewState::Ready(_) => {
            let rows = view.rows();
            let id_width = rows
                .iter()
                .map(|r| r.id.chars().count())
                .max()
                .unwrap_or(0)
                .max(2);

            let _ = writeln!(
                out,
                "{} {} {} {} {}",
                fit("ID", id_width),
                fit("Name", NAME_WIDTH),
                fit("Email", EMAIL_WIDTH),
                fit("Role", ROLE_WIDTH),
                "Status"
            );
            let _ = writeln!(
                out,
                "{}",
                "-".repeat(id_width + NAME_WIDTH + EMAIL_WIDTH + ROLE_WIDTH + STATUS_WIDTH + 4)
            );

            for row in &rows {
                let _ = writeln!(
                    out,
                    "{} {} {} {} {}",
                    fit(&row.id, id_width),
                    fit(&row.name, NAME_WIDTH),
                    fit(&row.email, EMAIL_WIDTH),
                    fit(&row.role, ROLE_WIDTH),
                    row.status
                );
            }

            let _ = writeln!(out);
            let _ = writeln!(out, "{} accounts. Use `account <ID>` for details.", rows.len());
        }
    }

    out
}

fn render_csv(rows: &[AccountRow]) -> Result<String, RenderError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(["id", "name", "email", "role", "status"])?;
    for row in rows {
        writer.write_record([&row.id, &row.name, &row.email, &row.role, &row.status])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    String::from_utf8(bytes).map_err(|_| RenderError::Utf8)
}

/// Render the detail panel for one account
pub fn render_account_detail(
    detail: &ViewState<AccountDetail>,
    format: OutputFormat,
) -> Result<String, RenderError> {
    if format == OutputFormat::Json {
        return Ok(serde_json::to_string_pretty(detail)?);
    }

    let detail = match detail {
        ViewState::Ready(detail) => detail,
        ViewState::Loading => return Ok(format!("{}\n", ACCOUNTS_LOADING)),
        ViewState::Failed(message) => return Ok(format!("Error: {}\n", message)),
        ViewState::Empty => return Ok(format!("{}\n", NO_ACCOUNTS)),
    };

    if format == OutputFormat::Csv {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.serialize(detail)?;
        let bytes = writer
            .into_inner()
            .map_err(|e| csv::Error::from(e.into_error()))?;
        return String::from_utf8(bytes).map_err(|_| RenderError::Utf8);
    }

    let mut out = String::new();
    let _ = writeln!(out, "Account details: {}", detail.name);
    let _ = writeln!(out, "{}", "-".repeat(40));
    let _ = writeln!(out, "User ID:          {}", detail.id);
    let _ = writeln!(out, "Full name:        {}", detail.name);
    let _ = writeln!(out, "Email:            {}", detail.email);
    let _ = writeln!(out, "Phone:            {}", detail.phone);
    let _ = writeln!(out, "Date of birth:    {}", detail.date_of_birth);
    let _ = writeln!(out, "{}", "-".repeat(40));
    let _ = writeln!(out, "Role:             {}", detail.role);
    let _ = writeln!(out, "Active:           {}", detail.active);
    let _ = writeln!(out, "Email verified:   {}", detail.email_verified);
    let _ = writeln!(out, "{}", "-".repeat(40));
    let _ = writeln!(out, "Created:          {}", detail.created_at);
    let _ = writeln!(out, "Last login:       {}", detail.last_login_at);
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{User, UserId};
    use chrono::{DateTime, Utc};

    fn users() -> Vec<User> {
        let created: DateTime<Utc> = DateTime::parse_from_rfc3339("2024-01-05T08:30:00Z")
            .unwrap()
            .with_timezone(&Utc);
        vec![
            User {
                user_id: UserId::Number(1),
                first_name: "Lan".to_string(),
                last_name: "Nguyen".to_string(),
                email: "lan@example.com".to_string(),
                phone_number: None,
                date_of_birth: None,
                role: Some("Admin".to_string()),
                is_active: true,
                is_email_verified: true,
                created_at: created,
                last_login_at: None,
            },
            User {
                user_id: UserId::Number(12),
                first_name: "Minh".to_string(),
                last_name: "Tran, Jr".to_string(),
                email: "minh@example.com".to_string(),
                phone_number: None,
                date_of_birth: None,
                role: None,
                is_active: false,
                is_email_verified: false,
                created_at: created,
                last_login_at: None,
            },
        ]
    }

    #[test]
    fn test_table() {
        let view = AccountsView::from_fetch(Ok(users()));
        let text = render_accounts(&view, OutputFormat::Table).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "Account Management");
        assert!(lines[2].starts_with("ID Name"));
        assert!(lines[4].starts_with("1  Lan Nguyen"));
        assert!(lines[4].ends_with("Active"));
        assert!(lines[5].ends_with("Locked"));
        assert!(text.contains("2 accounts."));
    }

    #[test]
    fn test_table_states() {
        let text = render_accounts(&AccountsView::loading(), OutputFormat::Table).unwrap();
        assert!(text.contains(ACCOUNTS_LOADING));

        let text = render_accounts(&AccountsView::from_fetch(Ok(Vec::new())), OutputFormat::Table)
            .unwrap();
        assert!(text.contains(NO_ACCOUNTS));
    }

    #[test]
    fn test_csv_quotes_commas() {
        let view = AccountsView::from_fetch(Ok(users()));
        let text = render_accounts(&view, OutputFormat::Csv).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], "id,name,email,role,status");
        assert_eq!(lines[1], "1,Lan Nguyen,lan@example.com,Admin,Active");
        assert_eq!(lines[2], "12,\"Minh Tran, Jr\",minh@example.com,,Locked");
    }

    #[test]
    fn test_json_failed_state() {
        let view = AccountsView::from_fetch(Err(crate::client::ApiError::SessionExpired));
        let json = render_accounts(&view, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["state"], "failed");
        assert_eq!(value["data"], "Session expired. Please log in again!");
    }

    #[test]
    fn test_detail_panel() {
        let view = AccountsView::from_fetch(Ok(users()));
        let detail = view.detail("12", &Default::default());
        let text = render_account_detail(&detail, OutputFormat::Table).unwrap();

        assert!(text.starts_with("Account details: Minh Tran, Jr\n"));
        assert!(text.contains("Phone:            N/A"));
        assert!(text.contains("Active:           No"));
        assert!(text.contains("Created:          05/01/2024 08:30"));

        let missing = view.detail("7", &Default::default());
        let text = render_account_detail(&missing, OutputFormat::Table).unwrap();
        assert_eq!(text, "Error: No account with id 7.\n");
    }
}
