//! Server-rendered pages.
//!
//! The whole UI is four small pages built with `format!`; no template
//! engine. Every piece of user-provided text goes through [`esc`] before it
//! is interpolated into markup. The chart on the dashboard is a Chart.js
//! line chart fed the label/data series as JSON.

use api::dashboard::Dashboard;
use api::{Account, WeightEntry};

use crate::flash::Flash;

/// Minimal HTML escaping for text and attribute positions.
fn esc(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

fn flash_list(flashes: &[Flash]) -> String {
    if flashes.is_empty() {
        return String::new();
    }
    let items: String = flashes
        .iter()
        .map(|f| {
            format!(
                "<li class=\"flash flash-{}\">{}</li>",
                esc(&f.category),
                esc(&f.message)
            )
        })
        .collect();
    format!("<ul class=\"flashes\">{items}</ul>")
}

fn layout(title: &str, flashes: &[Flash], body: &str) -> String {
    format!(
        "<!doctype html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title} — Weight Tracker</title>\n\
         <style>\n\
         body {{ font-family: system-ui, sans-serif; max-width: 56rem; margin: 2rem auto; padding: 0 1rem; }}\n\
         table {{ border-collapse: collapse; width: 100%; }}\n\
         th, td {{ border-bottom: 1px solid #ddd; padding: 0.4rem 0.6rem; text-align: left; }}\n\
         form.inline {{ display: inline; }}\n\
         fieldset {{ margin: 1rem 0; border: 1px solid #ccc; }}\n\
         .flashes {{ list-style: none; padding: 0; }}\n\
         .flash {{ padding: 0.5rem 0.8rem; margin: 0.3rem 0; border-radius: 4px; }}\n\
         .flash-success {{ background: #e6f4ea; }}\n\
         .flash-info {{ background: #e8f0fe; }}\n\
         .flash-warning {{ background: #fef7e0; }}\n\
         .flash-danger {{ background: #fce8e6; }}\n\
         .muted {{ color: #777; }}\n\
         </style>\n</head>\n<body>\n{flash}\n{body}\n</body>\n</html>\n",
        title = esc(title),
        flash = flash_list(flashes),
        body = body,
    )
}

pub fn login_page(flashes: &[Flash]) -> String {
    layout(
        "Sign in",
        flashes,
        "<h1>Sign in</h1>\n\
         <form method=\"post\" action=\"/login\">\n\
         <p><label>Username <input name=\"username\" required></label></p>\n\
         <p><label>Password <input name=\"password\" type=\"password\" required></label></p>\n\
         <p><button type=\"submit\">Sign in</button></p>\n\
         </form>\n\
         <p>No account yet? <a href=\"/register\">Register</a></p>",
    )
}

pub fn register_page(flashes: &[Flash]) -> String {
    layout(
        "Register",
        flashes,
        "<h1>Register</h1>\n\
         <form method=\"post\" action=\"/register\">\n\
         <p><label>Username <input name=\"username\" required></label></p>\n\
         <p><label>Password <input name=\"password\" type=\"password\" required></label></p>\n\
         <p><button type=\"submit\">Create account</button></p>\n\
         </form>\n\
         <p>Already registered? <a href=\"/login\">Sign in</a></p>",
    )
}

pub fn edit_page(entry: &WeightEntry, flashes: &[Flash]) -> String {
    let body = format!(
        "<h1>Edit entry</h1>\n\
         <form method=\"post\" action=\"/edit/{id}\">\n\
         <p><label>Day <input name=\"day\" type=\"date\" value=\"{day}\" required></label></p>\n\
         <p><label>Weight, kg <input name=\"kg\" type=\"number\" step=\"0.1\" value=\"{kg}\" required></label></p>\n\
         <p><button type=\"submit\">Save</button> <a href=\"/\">Cancel</a></p>\n\
         </form>",
        id = entry.id,
        day = entry.day.format("%Y-%m-%d"),
        kg = entry.kg,
    );
    layout("Edit entry", flashes, &body)
}

pub fn dashboard_page(account: &Account, board: &Dashboard, flashes: &[Flash]) -> String {
    let mut body = format!(
        "<h1>Weight Tracker</h1>\n\
         <p class=\"muted\">Signed in as {username} — <a href=\"/logout\">Sign out</a></p>\n",
        username = esc(&account.username),
    );

    body.push_str(&summary_block(board));
    body.push_str(&chart_block(board));
    body.push_str(&add_form());
    body.push_str(&history_table(board));
    body.push_str(&settings_form(account));

    layout("Dashboard", flashes, &body)
}

fn summary_block(board: &Dashboard) -> String {
    let mut parts = Vec::new();
    if let Some(current) = board.current {
        parts.push(format!("<b>Current:</b> {current:.1} kg"));
    }
    if let Some(progress) = board.progress {
        parts.push(format!("<b>Progress:</b> {progress:.0}%"));
    }
    if let Some(days) = board.days_elapsed {
        parts.push(format!("<b>Day</b> {days} of the goal"));
    }
    if let (Some(min), Some(max)) = (board.normal_min, board.normal_max) {
        parts.push(format!("<b>Normal range:</b> {min:.1}–{max:.1} kg"));
    }
    if parts.is_empty() {
        return String::new();
    }
    format!("<p>{}</p>\n", parts.join(" &middot; "))
}

fn chart_block(board: &Dashboard) -> String {
    if board.data.is_empty() {
        return "<p class=\"muted\">No entries yet — add your first weigh-in below.</p>\n"
            .to_string();
    }
    // Vec<String> / Vec<f64> serialization cannot fail.
    let labels = serde_json::to_string(&board.labels).unwrap_or_default();
    let data = serde_json::to_string(&board.data).unwrap_or_default();
    format!(
        "<canvas id=\"weight-chart\" height=\"110\"></canvas>\n\
         <script src=\"https://cdn.jsdelivr.net/npm/chart.js\"></script>\n\
         <script>\n\
         new Chart(document.getElementById('weight-chart'), {{\n\
           type: 'line',\n\
           data: {{ labels: {labels}, datasets: [{{ label: 'Weight, kg', data: {data}, tension: 0.25 }}] }},\n\
           options: {{ scales: {{ y: {{ beginAtZero: false }} }} }}\n\
         }});\n\
         </script>\n"
    )
}

fn add_form() -> String {
    "<fieldset><legend>Add weigh-in</legend>\n\
     <form method=\"post\" action=\"/add\">\n\
     <label>Day <input name=\"day\" type=\"date\" required></label>\n\
     <label>Weight, kg <input name=\"kg\" type=\"number\" step=\"0.1\" required></label>\n\
     <button type=\"submit\">Save</button>\n\
     </form></fieldset>\n"
        .to_string()
}

fn history_table(board: &Dashboard) -> String {
    if board.rows.is_empty() {
        return String::new();
    }
    let mut rows = String::new();
    for row in &board.rows {
        let pnl = row
            .pnl
            .map(|p| format!("{p:+.1}"))
            .unwrap_or_else(|| "—".to_string());
        let bmi = row
            .bmi
            .map(|b| format!("{b:.1}"))
            .unwrap_or_else(|| "—".to_string());
        let actions = match row.entry_id {
            Some(id) => format!(
                "<a href=\"/edit/{id}\">edit</a> <a href=\"/delete/{id}\">delete</a>"
            ),
            None => "<span class=\"muted\">start point</span>".to_string(),
        };
        rows.push_str(&format!(
            "<tr><td>{day}</td><td>{kg:.1}</td><td>{pnl}</td><td>{bmi}</td><td>{actions}</td></tr>\n",
            day = row.day.format("%Y-%m-%d"),
            kg = row.kg,
        ));
    }
    format!(
        "<table>\n<thead><tr><th>Day</th><th>kg</th><th>&Delta;</th><th>BMI</th><th></th></tr></thead>\n\
         <tbody>\n{rows}</tbody>\n</table>\n"
    )
}

fn settings_form(account: &Account) -> String {
    fn value(v: Option<f64>) -> String {
        v.map(|v| v.to_string()).unwrap_or_default()
    }
    format!(
        "<fieldset><legend>Goals</legend>\n\
         <form method=\"post\" action=\"/settings\">\n\
         <label>Height, cm <input name=\"height_cm\" type=\"number\" step=\"0.1\" value=\"{height}\"></label>\n\
         <label>Start weight <input name=\"start_weight\" type=\"number\" step=\"0.1\" value=\"{start}\"></label>\n\
         <label>Target weight <input name=\"target_weight\" type=\"number\" step=\"0.1\" value=\"{target}\"></label>\n\
         <label>Goal start <input name=\"goal_start\" type=\"date\" value=\"{goal_start}\"></label>\n\
         <button type=\"submit\">Update goals</button>\n\
         </form></fieldset>\n",
        height = value(account.height_cm),
        start = value(account.start_weight),
        target = value(account.target_weight),
        goal_start = account
            .goal_start
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default(),
    )
}
