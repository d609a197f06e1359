//! Request handlers: thin orchestration of session → store → aggregation →
//! rendering.
//!
//! Every mutating handler follows the same shape: validate, act, queue a
//! flash message, redirect. Expected failures
//! (malformed input, duplicate username, foreign entry) therefore never
//! become error responses — they become messages on the page the user lands
//! on next. The handler only bubbles a [`WebError`] for infrastructure
//! failures and missing routes/ids.

use api::models::GoalSettings;
use api::{auth, dashboard, AppError};
use axum::extract::{Form, Path, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use chrono::Local;
use tower_sessions::Session;

use crate::error::WebError;
use crate::forms::{self, CredentialsForm, SettingsForm, WeightForm};
use crate::views;
use crate::{flash, AppState};

/// Resolve the signed-in account or short-circuit to the login page,
/// the handler-level analog of a `login_required` guard.
macro_rules! require_account {
    ($session:expr, $store:expr) => {
        match auth::current_account($session, $store).await? {
            Some(account) => account,
            None => return Ok(Redirect::to("/login").into_response()),
        }
    };
}

// dashboard

pub async fn dashboard(
    State(state): State<AppState>,
    session: Session,
) -> Result<Response, WebError> {
    let account = require_account!(&session, &state.store);

    let entries = state.store.weights_for_account(account.id).await?;
    let board = dashboard::build(&entries, &account.goal(), Local::now().date_naive());

    let flashes = flash::take(&session).await?;
    Ok(Html(views::dashboard_page(&account, &board, &flashes)).into_response())
}

// registration / login

pub async fn register_form(session: Session) -> Result<Response, WebError> {
    let flashes = flash::take(&session).await?;
    Ok(Html(views::register_page(&flashes)).into_response())
}

pub async fn register_submit(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CredentialsForm>,
) -> Result<Response, WebError> {
    let username = form.username.trim();
    let password = form.password.trim();

    if username.is_empty() || password.is_empty() {
        flash::push(&session, "danger", "Username and password are required").await?;
        return Ok(Redirect::to("/register").into_response());
    }

    if state
        .store
        .find_account_by_username(username)
        .await?
        .is_some()
    {
        flash::push(&session, "warning", "Username is already taken").await?;
        return Ok(Redirect::to("/register").into_response());
    }

    let password_hash = auth::hash_password(password)?;
    match state.store.create_account(username, &password_hash).await {
        Ok(_) => {
            flash::push(&session, "success", "Registration complete. Please sign in.").await?;
            Ok(Redirect::to("/login").into_response())
        }
        // Lost a race with a concurrent registration for the same name.
        Err(AppError::Conflict(_)) => {
            flash::push(&session, "warning", "Username is already taken").await?;
            Ok(Redirect::to("/register").into_response())
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn login_form(session: Session) -> Result<Response, WebError> {
    let flashes = flash::take(&session).await?;
    Ok(Html(views::login_page(&flashes)).into_response())
}

pub async fn login_submit(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<CredentialsForm>,
) -> Result<Response, WebError> {
    let username = form.username.trim();
    let password = form.password.trim();

    match auth::authenticate(&state.store, username, password).await {
        Ok(account) => {
            auth::log_in(&session, account.id).await?;
            flash::push(&session, "success", "Signed in").await?;
            Ok(Redirect::to("/").into_response())
        }
        Err(AppError::AuthFailure) => {
            flash::push(&session, "danger", "Invalid username or password").await?;
            Ok(Redirect::to("/login").into_response())
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn logout(session: Session) -> Result<Response, WebError> {
    auth::log_out(&session).await?;
    // The flush reset the session; this lands in a fresh anonymous one.
    flash::push(&session, "info", "Signed out").await?;
    Ok(Redirect::to("/login").into_response())
}

// goals

pub async fn update_settings(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<SettingsForm>,
) -> Result<Response, WebError> {
    let account = require_account!(&session, &state.store);

    let mut goal = GoalSettings {
        height_cm: forms::parse_optional_f64(form.height_cm.as_deref()),
        start_weight: forms::parse_optional_f64(form.start_weight.as_deref()),
        target_weight: forms::parse_optional_f64(form.target_weight.as_deref()),
        goal_start: None,
    };

    // An absent or empty date clears the goal start; a malformed one is
    // reported but keeps the stored value, without blocking the floats.
    match form.goal_start.as_deref().map(str::trim) {
        None | Some("") => {}
        Some(raw) => match forms::parse_day(raw) {
            Ok(day) => goal.goal_start = Some(day),
            Err(_) => {
                flash::push(&session, "warning", "Invalid date format").await?;
                goal.goal_start = account.goal_start;
            }
        },
    }

    state.store.update_goal(account.id, &goal).await?;
    flash::push(&session, "success", "Goals updated").await?;
    Ok(Redirect::to("/").into_response())
}

// weight entries

pub async fn add_weight(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<WeightForm>,
) -> Result<Response, WebError> {
    let account = require_account!(&session, &state.store);

    let parsed = forms::parse_day(&form.day).and_then(|day| Ok((day, forms::parse_kg(&form.kg)?)));
    let Ok((day, kg)) = parsed else {
        flash::push(&session, "danger", "Invalid input").await?;
        return Ok(Redirect::to("/").into_response());
    };

    state.store.upsert_weight(account.id, day, kg).await?;
    flash::push(&session, "success", "Saved").await?;
    Ok(Redirect::to("/").into_response())
}

pub async fn edit_form(
    State(state): State<AppState>,
    session: Session,
    Path(entry_id): Path<String>,
) -> Result<Response, WebError> {
    let account = require_account!(&session, &state.store);

    let entry = match load_owned_entry(&state, &entry_id, account.id).await {
        Ok(entry) => entry,
        Err(WebError(AppError::AccessDenied)) => {
            flash::push(&session, "danger", "Access denied").await?;
            return Ok(Redirect::to("/").into_response());
        }
        Err(e) => return Err(e),
    };

    let flashes = flash::take(&session).await?;
    Ok(Html(views::edit_page(&entry, &flashes)).into_response())
}

pub async fn edit_submit(
    State(state): State<AppState>,
    session: Session,
    Path(entry_id): Path<String>,
    Form(form): Form<WeightForm>,
) -> Result<Response, WebError> {
    let account = require_account!(&session, &state.store);

    let entry = match load_owned_entry(&state, &entry_id, account.id).await {
        Ok(entry) => entry,
        Err(WebError(AppError::AccessDenied)) => {
            flash::push(&session, "danger", "Access denied").await?;
            return Ok(Redirect::to("/").into_response());
        }
        Err(e) => return Err(e),
    };

    let back = format!("/edit/{}", entry.id);
    let parsed = forms::parse_day(&form.day).and_then(|day| Ok((day, forms::parse_kg(&form.kg)?)));
    let Ok((day, kg)) = parsed else {
        flash::push(&session, "danger", "Invalid input").await?;
        return Ok(Redirect::to(&back).into_response());
    };

    match state.store.update_weight(entry.id, day, kg).await {
        Ok(()) => {
            flash::push(&session, "success", "Updated").await?;
            Ok(Redirect::to("/").into_response())
        }
        // The move landed on a day that already has an entry.
        Err(AppError::Conflict(message)) => {
            flash::push(&session, "warning", &message).await?;
            Ok(Redirect::to(&back).into_response())
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn delete_weight(
    State(state): State<AppState>,
    session: Session,
    Path(entry_id): Path<String>,
) -> Result<Response, WebError> {
    let account = require_account!(&session, &state.store);

    let entry = load_entry(&state, &entry_id).await?;
    // Deleting someone else's entry is a silent no-op, not an error.
    if entry.account_id == account.id {
        state.store.delete_weight(entry.id, account.id).await?;
        flash::push(&session, "info", "Deleted").await?;
    }
    Ok(Redirect::to("/").into_response())
}

/// Parse the path id and load the entry; both a non-numeric id and an
/// unknown one are NotFound.
async fn load_entry(state: &AppState, raw_id: &str) -> Result<api::WeightEntry, WebError> {
    let id: i64 = raw_id.parse().map_err(|_| AppError::NotFound)?;
    let entry = state.store.find_weight(id).await?;
    entry.ok_or_else(|| AppError::NotFound.into())
}

/// As [`load_entry`], but an entry owned by a different account is
/// AccessDenied rather than a successful load.
async fn load_owned_entry(
    state: &AppState,
    raw_id: &str,
    account_id: i64,
) -> Result<api::WeightEntry, WebError> {
    let entry = load_entry(state, raw_id).await?;
    if entry.account_id != account_id {
        return Err(AppError::AccessDenied.into());
    }
    Ok(entry)
}
