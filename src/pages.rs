//! Server-rendered HTML pages
//!
//! Deliberately minimal: a shared layout plus one builder per view, all
//! plain `format!` over already-fetched rows. Everything user-sourced goes
//! through `escape_html`.

use http::StatusCode;

use crate::auth::flash::{Level, Notice};
use crate::db::accounts::Account;
use crate::db::attendance::{AttendanceStatus, DaySummary};
use crate::db::profiles::{Gender, Profile};
use crate::db::tasks::{Task, TaskStatus, TaskWithAssignee};
use crate::util::escape_html;

fn layout(title: &str, notice: Option<&Notice>, body: &str) -> String {
    let notice_html = match notice {
        Some(n) => {
            let class = match n.level {
                Level::Success => "notice-success",
                Level::Error => "notice-error",
            };
            format!(
                r#"<p class="notice {class}">{}</p>"#,
                escape_html(&n.message)
            )
        }
        None => String::new(),
    };
    format!(
        "<!doctype html>\n<html><head><meta charset=\"utf-8\">\
         <title>{title} — staff-hub</title></head>\n\
         <body>\n{notice_html}\n{body}\n</body></html>",
        title = escape_html(title),
    )
}

fn fmt_millis(ms: i64) -> String {
    chrono::DateTime::from_timestamp_millis(ms)
        .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}

pub fn error_page(status: StatusCode, message: &str) -> String {
    let body = format!(
        "<h1>{}</h1><p>{}</p><p><a href=\"/\">Home</a></p>",
        status.as_u16(),
        escape_html(message)
    );
    layout("Error", None, &body)
}

pub fn home_page(notice: Option<&Notice>) -> String {
    let body = "<h1>staff-hub</h1>\
         <p><a href=\"/login/\">Employee login</a> | \
         <a href=\"/signup/\">Sign up</a> | \
         <a href=\"/admin-login/\">Admin login</a></p>";
    layout("Welcome", notice, body)
}

fn login_form(action: &str, heading: &str) -> String {
    format!(
        "<h1>{heading}</h1>\
         <form method=\"post\" action=\"{action}\">\
         <label>Email <input type=\"email\" name=\"username\" required></label>\
         <label>Password <input type=\"password\" name=\"password\" required></label>\
         <button type=\"submit\">Log in</button>\
         </form>"
    )
}

pub fn login_page(notice: Option<&Notice>) -> String {
    let body = format!(
        "{}<p><a href=\"/signup/\">Need an account? Sign up</a></p>",
        login_form("/login/", "Employee login")
    );
    layout("Login", notice, &body)
}

pub fn admin_login_page(notice: Option<&Notice>) -> String {
    layout(
        "Admin login",
        notice,
        &login_form("/admin-login/", "Admin login"),
    )
}

pub fn signup_page(notice: Option<&Notice>) -> String {
    let body = "<h1>Sign up</h1>\
         <form method=\"post\" action=\"/signup/\">\
         <label>First name <input name=\"first_name\" required></label>\
         <label>Last name <input name=\"last_name\" required></label>\
         <label>Email <input type=\"email\" name=\"email\" required></label>\
         <label>Password <input type=\"password\" name=\"password\" required></label>\
         <button type=\"submit\">Create account</button>\
         </form>";
    layout("Sign up", notice, body)
}

fn task_row(task: &Task) -> String {
    let status = TaskStatus::from_db(&task.status)
        .map(|s| s.label())
        .unwrap_or("?");
    let complete_form = if task.is_completed() {
        String::new()
    } else {
        format!(
            "<form method=\"post\" action=\"/dashboard/\">\
             <input type=\"hidden\" name=\"task_id\" value=\"{}\">\
             <button type=\"submit\">Mark complete</button></form>",
            task.id
        )
    };
    let description = if task.description.is_empty() {
        String::new()
    } else {
        format!("<br><small>{}</small>", escape_html(&task.description))
    };
    format!(
        "<li>{} [{status}] ({}){description} {complete_form}</li>",
        escape_html(&task.title),
        fmt_millis(task.created_at)
    )
}

pub fn dashboard_page(
    account: &Account,
    completion: u8,
    today: Option<AttendanceStatus>,
    tasks: &[Task],
    notice: Option<&Notice>,
) -> String {
    let attendance = match today {
        Some(status) => format!("Marked: {}", status.label()),
        None => "Not marked yet".to_string(),
    };
    let task_list: String = tasks.iter().map(|t| task_row(t)).collect();
    let body = format!(
        "<h1>Welcome, {name}</h1>\
         <p><a href=\"/profile/\">Profile</a> | \
         <a href=\"/search-employees/\">Find colleagues</a> | \
         <a href=\"/logout/\">Log out</a></p>\
         <p>Profile completion: {completion}%</p>\
         <h2>Today's attendance</h2><p>{attendance}</p>\
         <form method=\"post\" action=\"/attendance/mark/\">\
         <button name=\"status\" value=\"Present\">Present</button>\
         <button name=\"status\" value=\"Absent\">Absent</button>\
         </form>\
         <h2>My tasks</h2><ul>{task_list}</ul>",
        name = escape_html(&account.full_name()),
    );
    layout("Dashboard", notice, &body)
}

fn profile_card(account: &Account, profile: &Profile) -> String {
    let photo = match &profile.photo_path {
        Some(path) => format!(
            "<img src=\"/media/{}\" alt=\"photo\" width=\"120\">",
            escape_html(path)
        ),
        None => String::new(),
    };
    let gender = profile.gender().map(|g| g.label()).unwrap_or("—");
    format!(
        "{photo}\
         <dl>\
         <dt>Name</dt><dd>{}</dd>\
         <dt>Email</dt><dd>{}</dd>\
         <dt>Job title</dt><dd>{}</dd>\
         <dt>Education</dt><dd>{}</dd>\
         <dt>Gender</dt><dd>{gender}</dd>\
         <dt>Experience</dt><dd>{} years</dd>\
         </dl>",
        escape_html(&account.full_name()),
        escape_html(&account.email),
        escape_html(&profile.job_title),
        escape_html(&profile.education),
        profile.experience_years,
    )
}

pub fn profile_page(account: &Account, profile: &Profile, notice: Option<&Notice>) -> String {
    let body = format!(
        "<h1>My profile</h1>{}\
         <p><a href=\"/profile/edit/\">Edit</a> | \
         <a href=\"/dashboard/\">Dashboard</a></p>",
        profile_card(account, profile)
    );
    layout("Profile", notice, &body)
}

pub fn employee_profile_page(account: &Account, profile: &Profile) -> String {
    let body = format!(
        "<h1>{}</h1>{}\
         <p><a href=\"/search-employees/\">Back to search</a></p>",
        escape_html(&account.full_name()),
        profile_card(account, profile)
    );
    layout("Employee profile", None, &body)
}

pub fn edit_profile_page(account: &Account, profile: &Profile, notice: Option<&Notice>) -> String {
    let gender_options: String = [Gender::Male, Gender::Female, Gender::Other]
        .iter()
        .map(|g| {
            let selected = if profile.gender == g.as_db() {
                " selected"
            } else {
                ""
            };
            format!("<option value=\"{}\"{selected}>{}</option>", g.label(), g.label())
        })
        .collect();
    let body = format!(
        "<h1>Edit profile</h1>\
         <form method=\"post\" action=\"/profile/edit/\" enctype=\"multipart/form-data\">\
         <label>First name <input name=\"first_name\" value=\"{first}\"></label>\
         <label>Last name <input name=\"last_name\" value=\"{last}\"></label>\
         <label>Email <input type=\"email\" name=\"email\" value=\"{email}\"></label>\
         <label>Job title <input name=\"job_title\" value=\"{job}\"></label>\
         <label>Education <input name=\"education\" value=\"{edu}\"></label>\
         <label>Gender <select name=\"gender\"><option value=\"\"></option>{gender_options}</select></label>\
         <label>Years of experience <input type=\"number\" name=\"experience\" min=\"0\" value=\"{exp}\"></label>\
         <label>Photo <input type=\"file\" name=\"profile_photo\" accept=\"image/*\"></label>\
         <button type=\"submit\">Save</button>\
         </form>\
         <p><a href=\"/profile/\">Cancel</a></p>",
        first = escape_html(&account.first_name),
        last = escape_html(&account.last_name),
        email = escape_html(&account.email),
        job = escape_html(&profile.job_title),
        edu = escape_html(&profile.education),
        exp = profile.experience_years,
    );
    layout("Edit profile", notice, &body)
}

pub fn search_page(query: &str, results: &[Account], notice: Option<&Notice>) -> String {
    let rows: String = results
        .iter()
        .map(|a| {
            format!(
                "<li><a href=\"/employee/{}/\">{}</a> ({})</li>",
                a.id,
                escape_html(&a.full_name()),
                escape_html(&a.email)
            )
        })
        .collect();
    let empty = if query.is_empty() {
        String::new()
    } else if results.is_empty() {
        "<p>No employees found.</p>".to_string()
    } else {
        String::new()
    };
    let body = format!(
        "<h1>Find colleagues</h1>\
         <form method=\"get\" action=\"/search-employees/\">\
         <input name=\"q\" value=\"{q}\" placeholder=\"Name or email\">\
         <button type=\"submit\">Search</button></form>\
         <ul>{rows}</ul>{empty}\
         <p><a href=\"/dashboard/\">Dashboard</a></p>",
        q = escape_html(query),
    );
    layout("Search employees", notice, &body)
}

/// Everything the admin dashboard renders in one pass.
pub struct AdminDashboard<'a> {
    pub search: &'a str,
    pub total_employees: i64,
    pub employees: &'a [Account],
    pub pending: &'a [TaskWithAssignee],
    pub completed: &'a [TaskWithAssignee],
    pub summary: &'a DaySummary,
}

fn admin_task_row(task: &TaskWithAssignee) -> String {
    format!(
        "<li>{} — {} {} ({})\
         <form method=\"post\" action=\"/delete-task/{}/\">\
         <button type=\"submit\">Delete</button></form></li>",
        escape_html(&task.title),
        escape_html(&task.first_name),
        escape_html(&task.last_name),
        fmt_millis(task.created_at),
        task.id
    )
}

pub fn admin_dashboard_page(view: &AdminDashboard<'_>, notice: Option<&Notice>) -> String {
    let employee_rows: String = view
        .employees
        .iter()
        .map(|a| {
            format!(
                "<li><label><input type=\"checkbox\" name=\"employee\" value=\"{id}\" form=\"assign\"> \
                 {name} ({email})</label>\
                 <form method=\"post\" action=\"/admin/delete-employee/{id}/\" style=\"display:inline\">\
                 <button type=\"submit\">Delete</button></form></li>",
                id = a.id,
                name = escape_html(&a.full_name()),
                email = escape_html(&a.email),
            )
        })
        .collect();

    let pending_rows: String = view.pending.iter().map(admin_task_row).collect();
    let completed_rows: String = view.completed.iter().map(admin_task_row).collect();

    let present_rows: String = view
        .summary
        .present
        .iter()
        .map(|r| format!("<li>{} {}</li>", escape_html(&r.first_name), escape_html(&r.last_name)))
        .collect();
    let absent_rows: String = view
        .summary
        .absent
        .iter()
        .map(|r| format!("<li>{} {}</li>", escape_html(&r.first_name), escape_html(&r.last_name)))
        .collect();
    let unmarked_rows: String = view
        .summary
        .unmarked
        .iter()
        .map(|a| format!("<li>{}</li>", escape_html(&a.full_name())))
        .collect();

    let body = format!(
        "<h1>Admin dashboard</h1>\
         <p><a href=\"/admin-logout/\">Log out</a></p>\
         <p>Total employees: {total}</p>\
         <form method=\"get\" action=\"/admin-dashboard/\">\
         <input name=\"search\" value=\"{search}\" placeholder=\"Search employees\">\
         <button type=\"submit\">Search</button></form>\
         <h2>Employees</h2>\
         <form id=\"assign\" method=\"post\" action=\"/admin-dashboard/\">\
         <input name=\"title\" placeholder=\"Task title\">\
         <button type=\"submit\">Assign to selected</button></form>\
         <ul>{employee_rows}</ul>\
         <h2>Pending tasks</h2><ul>{pending_rows}</ul>\
         <h2>Completed tasks</h2><ul>{completed_rows}</ul>\
         <h2>Attendance today</h2>\
         <p>Present: {present_count} | Absent: {absent_count}</p>\
         <h3>Present</h3><ul>{present_rows}</ul>\
         <h3>Absent</h3><ul>{absent_rows}</ul>\
         <h3>Not marked</h3><ul>{unmarked_rows}</ul>",
        total = view.total_employees,
        search = escape_html(view.search),
        present_count = view.summary.present.len(),
        absent_count = view.summary.absent.len(),
    );
    layout("Admin dashboard", notice, &body)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(id: i64, first: &str, email: &str) -> Account {
        Account {
            id,
            email: email.into(),
            hashed_password: String::new(),
            first_name: first.into(),
            last_name: "Doe".into(),
            is_staff: false,
            is_superuser: false,
            created_at: 0,
        }
    }

    #[test]
    fn test_layout_escapes_notice() {
        let notice = Notice::error("<script>alert(1)</script>");
        let html = layout("T", Some(&notice), "");
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_search_page_escapes_query() {
        let html = search_page("\"><img src=x>", &[], None);
        assert!(!html.contains("\"><img src=x>"));
    }

    #[test]
    fn test_search_page_links_results() {
        let results = vec![account(7, "Ali", "ali@x.com")];
        let html = search_page("ali", &results, None);
        assert!(html.contains("/employee/7/"));
        assert!(html.contains("Ali Doe"));
    }

    #[test]
    fn test_dashboard_offers_completion_only_for_pending() {
        let acc = account(1, "Jo", "jo@x.com");
        let tasks = vec![
            Task {
                id: 1,
                account_id: 1,
                title: "open".into(),
                description: String::new(),
                status: "pending".into(),
                created_at: 0,
            },
            Task {
                id: 2,
                account_id: 1,
                title: "done".into(),
                description: String::new(),
                status: "completed".into(),
                created_at: 0,
            },
        ];
        let html = dashboard_page(&acc, 40, None, &tasks, None);
        assert_eq!(html.matches("name=\"task_id\"").count(), 1);
        assert!(html.contains("value=\"1\""));
    }
}
