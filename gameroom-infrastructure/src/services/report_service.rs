use std::path::Path;

use anyhow::Result;
use tokio::fs;
use tracing::info;

use gameroom_application::queries::render_dashboard;
use gameroom_application::AppState;
use gameroom_domain::{Dashboard, DashboardRenderer, Section, WindowSummary};

use crate::utils::escape_html;

/// Renders the dashboard and writes it to `output`.
pub async fn write_dashboard(state: &AppState, output: &Path) -> Result<()> {
    let html = render_dashboard(state).await?;
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).await?;
        }
    }
    fs::write(output, html).await?;
    info!("dashboard written to {}", output.display());
    Ok(())
}

#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlDashboardRenderer;

impl DashboardRenderer for HtmlDashboardRenderer {
    fn render(&self, dashboard: &Dashboard) -> String {
        render_dashboard_html(dashboard)
    }
}

pub fn render_dashboard_html(dashboard: &Dashboard) -> String {
    let mut panels = String::new();

    panels.push_str(&panel("Growth over time", &dashboard.growth, |growth| {
        let mut months: Vec<&str> = growth
            .matches_per_month
            .iter()
            .map(|row| row.month.as_str())
            .chain(growth.ticket_amount_per_month.iter().map(|row| row.month.as_str()))
            .chain(growth.users_per_month.iter().map(|row| row.month.as_str()))
            .collect();
        months.sort_unstable();
        months.dedup();
        let rows = months
            .into_iter()
            .map(|month| {
                let matches = growth
                    .matches_per_month
                    .iter()
                    .find(|row| row.month == month)
                    .map_or(0, |row| row.value);
                let tickets = growth
                    .ticket_amount_per_month
                    .iter()
                    .find(|row| row.month == month)
                    .map_or(0, |row| row.value);
                let users = growth
                    .users_per_month
                    .iter()
                    .find(|row| row.month == month)
                    .map_or(0, |row| row.value);
                vec![
                    month.to_string(),
                    matches.to_string(),
                    tickets.to_string(),
                    users.to_string(),
                ]
            })
            .collect();
        table(&["Month", "Matches", "Tickets", "New users"], rows)
    }));

    panels.push_str(&panel(
        "Tickets by game",
        &dashboard.tickets_by_game,
        |totals| {
            let rows = totals
                .iter()
                .map(|total| vec![total.game.clone(), total.amount.to_string()])
                .collect();
            table(&["Game", "Tickets"], rows)
        },
    ));

    panels.push_str(&panel(
        "Tickets by game and month",
        &dashboard.tickets_by_game_month,
        |pivot| {
            let mut headers = vec!["Month"];
            headers.extend(pivot.games.iter().map(String::as_str));
            let rows = pivot
                .rows
                .iter()
                .map(|row| {
                    let mut cells = vec![row.month.clone()];
                    cells.extend(row.amounts.iter().map(ToString::to_string));
                    cells
                })
                .collect();
            table(&headers, rows)
        },
    ));

    panels.push_str(&panel(
        "Matches and tickets by event",
        &dashboard.event_summary,
        |rows| window_table(rows, "Matches", "Tickets", |sum| sum.to_string()),
    ));

    panels.push_str(&panel(
        "Paid orders by event",
        &dashboard.orders_by_event,
        |rows| window_table(rows, "Orders", "Total", |sum| format!("{:.2}", sum)),
    ));

    panels.push_str(&panel(
        "Order values by event",
        &dashboard.order_values_by_event,
        |values| {
            let rows = values
                .iter()
                .map(|row| {
                    vec![
                        row.window.clone(),
                        format!("{:.2}", row.value),
                        row.quantity.to_string(),
                    ]
                })
                .collect();
            table(&["Window", "Value", "Quantity"], rows)
        },
    ));

    panels.push_str(&panel("Heavy users", &dashboard.heavy_users, |users| {
        let rows = users
            .iter()
            .map(|user| {
                vec![
                    user.rank.to_string(),
                    user.nickname.clone(),
                    user.user_id.to_string(),
                    user.total_matches.to_string(),
                ]
            })
            .collect();
        table(&["#", "Nickname", "User", "Matches"], rows)
    }));

    panels.push_str(&panel(
        "Top users in featured event",
        &dashboard.event_top_users,
        |report| {
            let mut rows = Vec::new();
            for user in &report.users {
                rows.push(vec![
                    user.rank.to_string(),
                    user.nickname.clone(),
                    "total".to_string(),
                    String::new(),
                    user.total_matches.to_string(),
                ]);
                for day in &user.daily {
                    rows.push(vec![
                        String::new(),
                        String::new(),
                        day.date.to_string(),
                        day.game.clone(),
                        day.matches.to_string(),
                    ]);
                }
            }
            format!(
                "<p class=\"caption\">{} &middot; {} to {}</p>{}",
                escape_html(&report.title),
                report.start.format("%Y-%m-%d %H:%M"),
                report.end.format("%Y-%m-%d %H:%M"),
                table(&["#", "Nickname", "Day", "Game", "Matches"], rows)
            )
        },
    ));

    panels.push_str(&panel(
        "Tickets by difficulty",
        &dashboard.tickets_by_level,
        |levels| {
            let rows = levels
                .iter()
                .map(|level| {
                    vec![
                        level.level.clone(),
                        format!("{:.0}%", level.share * 100.0),
                        format!("{:.2}", level.tickets),
                    ]
                })
                .collect();
            table(&["Level", "Share", "Tickets"], rows)
        },
    ));

    panels.push_str(&panel("Client projection", &dashboard.projection, |p| {
        let summary = table(
            &["Metric", "Value"],
            vec![
                vec!["Participating clients".to_string(), format!("{:.0}", p.adjusted_clients)],
                vec!["Weeks".to_string(), p.weeks.to_string()],
                vec!["Matches per user".to_string(), format!("{:.2}", p.avg_matches_per_user)],
                vec!["Tickets per user".to_string(), format!("{:.2}", p.avg_ticket_value_per_user)],
                vec!["Projected matches".to_string(), format!("{:.2}", p.projected_matches)],
                vec!["Projected tickets".to_string(), format!("{:.2}", p.projected_tickets)],
                vec!["Infrastructure cost".to_string(), format!("{:.2}", p.infra_cost)],
            ],
        );
        let shares = p
            .per_game
            .iter()
            .map(|share| {
                vec![
                    share.game.clone(),
                    format!("{:.2}%", share.match_share_pct),
                    format!("{:.2}%", share.ticket_share_pct),
                ]
            })
            .collect();
        format!(
            "{}{}",
            summary,
            table(&["Game", "Match share", "Ticket share"], shares)
        )
    }));

    panels.push_str(&panel(
        "Competition engagement",
        &dashboard.competitions,
        |competitions| {
            let rows = competitions
                .iter()
                .flat_map(|competition| {
                    competition.points.iter().map(|point| {
                        vec![
                            competition.name.clone(),
                            point.date.to_string(),
                            point.total_average_time.clone(),
                            point.seconds.to_string(),
                            point.observations.clone(),
                        ]
                    })
                })
                .collect();
            table(
                &["Competition", "Date", "Average time", "Seconds", "Observations"],
                rows,
            )
        },
    ));

    panels.push_str(&panel("Demographics", &dashboard.demographics, |demo| {
        let rows = demo
            .gender
            .iter()
            .map(|share| ("Gender", share))
            .chain(demo.age.iter().map(|share| ("Age", share)))
            .map(|(group, share)| {
                vec![
                    group.to_string(),
                    share.label.clone(),
                    format!("{:.1}%", share.percentage),
                ]
            })
            .collect();
        table(&["Group", "Label", "Percentage"], rows)
    }));

    let warnings: String = dashboard
        .warnings
        .iter()
        .map(|warning| format!("<li>{}</li>", escape_html(warning)))
        .collect();
    let warnings = if warnings.is_empty() {
        String::new()
    } else {
        format!("<ul class=\"warnings\">{}</ul>", warnings)
    };

    let failed = dashboard.failed_sections();
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8" />
<meta name="viewport" content="width=device-width, initial-scale=1" />
<title>GameRoom Dashboard</title>
<style>
:root {{
  --ink: #0f172a;
  --muted: #64748b;
  --border: #e2e8f0;
  --shadow: rgba(15, 23, 42, 0.14);
  --error: #dc2626;
  --warn: #f59e0b;
}}
* {{ box-sizing: border-box; }}
body {{
  margin: 0;
  font-family: "IBM Plex Sans", "Source Sans 3", sans-serif;
  background: radial-gradient(circle at top, #1e293b 0%, #0f172a 55%, #0b1220 100%);
  color: #e2e8f0;
}}
.page {{ max-width: 1200px; margin: 0 auto; padding: 32px 20px 48px; }}
.hero {{
  background: linear-gradient(135deg, rgba(37,99,235,0.18), rgba(15,23,42,0.95));
  border-radius: 20px;
  padding: 28px;
  box-shadow: 0 18px 40px rgba(15, 23, 42, 0.35);
}}
.hero h1 {{ margin: 0 0 6px; font-size: 28px; }}
.hero p {{ margin: 0; color: var(--muted); font-size: 14px; }}
.summary {{
  display: grid;
  grid-template-columns: repeat(auto-fit, minmax(180px, 1fr));
  gap: 12px;
  margin-top: 18px;
}}
.card {{
  background: rgba(255,255,255,0.96);
  color: var(--ink);
  padding: 16px 18px;
  border-radius: 14px;
}}
.card .label {{ font-size: 11px; text-transform: uppercase; letter-spacing: 0.12em; color: var(--muted); }}
.card .value {{ font-size: 22px; font-weight: 700; margin-top: 6px; }}
.warnings {{ color: var(--warn); font-size: 13px; }}
.panel {{
  background: #ffffff;
  color: var(--ink);
  border-radius: 16px;
  margin-top: 22px;
  padding: 18px;
  box-shadow: 0 12px 28px var(--shadow);
}}
.panel h2 {{ margin: 0 0 12px; font-size: 18px; }}
.caption {{ color: var(--muted); font-size: 13px; margin: 0 0 8px; }}
.banner.error {{
  background: #fef2f2;
  border-left: 4px solid var(--error);
  color: var(--error);
  padding: 12px 14px;
  border-radius: 8px;
}}
.table {{ width: 100%; border-collapse: collapse; font-size: 14px; }}
.table thead th {{
  text-align: left;
  font-size: 11px;
  letter-spacing: 0.12em;
  text-transform: uppercase;
  color: #64748b;
  background: #f1f5f9;
  padding: 10px 12px;
}}
.table tbody td {{ padding: 10px 12px; border-bottom: 1px solid var(--border); }}
.table tbody tr:nth-child(even) {{ background: #f8fafc; }}
.empty {{ padding: 16px; text-align: center; color: var(--muted); }}
</style>
</head>
<body>
<div class="page">
  <section class="hero">
    <h1>GameRoom Dashboard</h1>
    <p>Generated {generated} &middot; session {session}</p>
    <div class="summary">
      <div class="card"><div class="label">Sections</div><div class="value">{total}</div></div>
      <div class="card"><div class="label">Failed</div><div class="value">{failed}</div></div>
      <div class="card"><div class="label">Warnings</div><div class="value">{warning_count}</div></div>
    </div>
    {warnings}
  </section>
  {panels}
</div>
</body>
</html>"#,
        generated = dashboard.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
        session = escape_html(&dashboard.session_id),
        total = SECTION_COUNT,
        failed = failed,
        warning_count = dashboard.warnings.len(),
        warnings = warnings,
        panels = panels,
    )
}

const SECTION_COUNT: usize = 12;

fn panel<T>(title: &str, section: &Section<T>, body: impl FnOnce(&T) -> String) -> String {
    let content = match section {
        Section::Ok { data } => body(data),
        Section::Error { error } => format!(
            "<div class=\"banner error\">This report could not be computed: {}</div>",
            escape_html(error)
        ),
    };
    format!(
        "<section class=\"panel\"><h2>{}</h2>{}</section>",
        escape_html(title),
        content
    )
}

fn table(headers: &[&str], rows: Vec<Vec<String>>) -> String {
    if rows.is_empty() {
        return "<div class=\"empty\">No data.</div>".to_string();
    }
    let head: String = headers
        .iter()
        .map(|header| format!("<th>{}</th>", escape_html(header)))
        .collect();
    let body: String = rows
        .iter()
        .map(|row| {
            let cells: String = row
                .iter()
                .map(|cell| format!("<td>{}</td>", escape_html(cell)))
                .collect();
            format!("<tr>{}</tr>", cells)
        })
        .collect();
    format!(
        "<table class=\"table\"><thead><tr>{}</tr></thead><tbody>{}</tbody></table>",
        head, body
    )
}

fn window_table<S>(
    rows: &[WindowSummary<S>],
    count_label: &str,
    sum_label: &str,
    format_sum: impl Fn(&S) -> String,
) -> String {
    let rows = rows
        .iter()
        .map(|row| {
            vec![
                row.label.clone(),
                row.start.format("%Y-%m-%d").to_string(),
                row.end.format("%Y-%m-%d").to_string(),
                row.duration_days.to_string(),
                row.count.to_string(),
                format_sum(&row.sum),
                format!("{:.2}", row.avg_per_day),
            ]
        })
        .collect();
    table(
        &["Window", "Start", "End", "Days", count_label, sum_label, "Per day"],
        rows,
    )
}
