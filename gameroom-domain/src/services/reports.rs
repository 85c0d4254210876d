// Aggregation reports over normalized tables
//
// Each report is a pure function returning `Result<_, ReportError>`; a record
// missing a field the report needs fails the report, not the dashboard.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::{DateTime, NaiveDate, Utc};

use crate::entities::{
    DailyGameCount, EventSummaryRow, EventTopUser, EventTopUsersReport, EventWindowParams,
    GameMonthPivot, GameMonthRow, GameTotal, GrowthReport, HeavyUserRow, LevelShare, MatchRecord,
    MonthlyValue, OrderRecord, OrderSummaryRow, OrderValueRow, TicketRecord, UserRecord,
    EventRecord,
};
use crate::errors::{add_amount, require, ReportError};
use crate::services::timeline::{count_in, sum_in, Tally, Window, WindowPlan};
use crate::utils::{month_key, round2};
use crate::value_objects::{GameId, UserId};

pub const UNKNOWN_NICKNAME: &str = "Unknown";

pub const DIFFICULTY_LEVELS: [(&str, f64); 4] = [
    ("Easy", 0.25),
    ("Medium", 0.35),
    ("Hard", 0.30),
    ("Extreme", 0.10),
];

const MATCHES: &str = "gamehistories";
const TICKETS: &str = "tickets";
const USERS: &str = "users";
const ORDERS: &str = "orders";

pub fn growth_report(
    matches: &[MatchRecord],
    tickets: &[TicketRecord],
    users: &[UserRecord],
) -> Result<GrowthReport, ReportError> {
    let mut match_months: BTreeMap<String, u64> = BTreeMap::new();
    for (index, record) in matches.iter().enumerate() {
        let created_at = require(&record.created_at, MATCHES, "createdAt", index)?;
        *match_months.entry(month_key(*created_at)).or_default() += 1;
    }

    let mut ticket_months: BTreeMap<String, i64> = BTreeMap::new();
    for (index, record) in tickets.iter().enumerate() {
        let created_at = require(&record.created_at, TICKETS, "createdAt", index)?;
        let amount = require(&record.amount, TICKETS, "amount", index)?;
        let total = ticket_months.entry(month_key(*created_at)).or_default();
        add_amount(total, *amount, TICKETS, "amount")?;
    }

    let mut user_months: BTreeMap<String, u64> = BTreeMap::new();
    for (index, record) in users.iter().enumerate() {
        let created_at = require(&record.created_at, USERS, "createdAt", index)?;
        *user_months.entry(month_key(*created_at)).or_default() += 1;
    }

    Ok(GrowthReport {
        matches_per_month: monthly(match_months),
        ticket_amount_per_month: monthly(ticket_months),
        users_per_month: monthly(user_months),
    })
}

fn monthly<T>(buckets: BTreeMap<String, T>) -> Vec<MonthlyValue<T>> {
    buckets
        .into_iter()
        .map(|(month, value)| MonthlyValue { month, value })
        .collect()
}

pub fn tickets_by_game(tickets: &[TicketRecord]) -> Result<Vec<GameTotal>, ReportError> {
    let mut totals: BTreeMap<GameId, i64> = BTreeMap::new();
    for (index, record) in tickets.iter().enumerate() {
        let game_id = require(&record.game_id, TICKETS, "gameId", index)?;
        let amount = require(&record.amount, TICKETS, "amount", index)?;
        let total = totals.entry(game_id.clone()).or_default();
        add_amount(total, *amount, TICKETS, "amount")?;
    }
    Ok(totals
        .into_iter()
        .map(|(game_id, amount)| GameTotal {
            game: game_id.label(),
            game_id,
            amount,
        })
        .collect())
}

pub fn tickets_by_game_month(tickets: &[TicketRecord]) -> Result<GameMonthPivot, ReportError> {
    let mut games: BTreeSet<GameId> = BTreeSet::new();
    let mut cells: BTreeMap<String, HashMap<GameId, i64>> = BTreeMap::new();
    for (index, record) in tickets.iter().enumerate() {
        let created_at = require(&record.created_at, TICKETS, "createdAt", index)?;
        let game_id = require(&record.game_id, TICKETS, "gameId", index)?;
        let amount = require(&record.amount, TICKETS, "amount", index)?;
        games.insert(game_id.clone());
        let cell = cells
            .entry(month_key(*created_at))
            .or_default()
            .entry(game_id.clone())
            .or_default();
        add_amount(cell, *amount, TICKETS, "amount")?;
    }

    let game_ids: Vec<GameId> = games.into_iter().collect();
    let rows = cells
        .into_iter()
        .map(|(month, amounts)| GameMonthRow {
            amounts: game_ids
                .iter()
                .map(|game_id| amounts.get(game_id).copied().unwrap_or(0))
                .collect(),
            month,
        })
        .collect();

    Ok(GameMonthPivot {
        games: game_ids.iter().map(GameId::label).collect(),
        game_ids,
        rows,
    })
}

/// Matches counted and ticket amounts summed per event window and gap.
pub fn event_summary(
    matches: &[MatchRecord],
    tickets: &[TicketRecord],
    events: &[EventRecord],
) -> Result<Vec<EventSummaryRow>, ReportError> {
    let plan = WindowPlan::from_events(events)?;

    let match_instants = matches
        .iter()
        .enumerate()
        .map(|(index, record)| {
            require(&record.created_at, MATCHES, "createdAt", index).copied()
        })
        .collect::<Result<Vec<DateTime<Utc>>, ReportError>>()?;

    let mut ticket_points = Vec::with_capacity(tickets.len());
    for (index, record) in tickets.iter().enumerate() {
        let created_at = require(&record.created_at, TICKETS, "createdAt", index)?;
        let amount = require(&record.amount, TICKETS, "amount", index)?;
        ticket_points.push((*created_at, *amount));
    }

    plan.summarize(|window| {
        Some(Tally {
            count: count_in(&match_instants, window),
            sum: sum_in(&ticket_points, window)?.sum,
        })
    })
    .ok_or(ReportError::Overflow {
        table: TICKETS,
        field: "amount",
    })
}

/// Paid orders as `(createdAt, totalAmount)` points.
fn paid_order_points(orders: &[OrderRecord]) -> Result<Vec<(DateTime<Utc>, f64)>, ReportError> {
    let mut points = Vec::new();
    for (index, record) in orders.iter().enumerate() {
        let status = require(&record.payment_status, ORDERS, "paymentStatus", index)?;
        if !status.is_paid() {
            continue;
        }
        let created_at = require(&record.created_at, ORDERS, "createdAt", index)?;
        let total = require(&record.total_amount, ORDERS, "totalAmount", index)?;
        points.push((*created_at, *total));
    }
    Ok(points)
}

pub fn orders_by_event(
    orders: &[OrderRecord],
    events: &[EventRecord],
) -> Result<Vec<OrderSummaryRow>, ReportError> {
    let plan = WindowPlan::from_events(events)?;
    let points = paid_order_points(orders)?;
    let mut rows = plan
        .summarize(|window| sum_in(&points, window))
        .ok_or(ReportError::Overflow {
            table: ORDERS,
            field: "totalAmount",
        })?;
    for row in &mut rows {
        row.sum = round2(row.sum);
    }
    Ok(rows)
}

/// Distinct paid order values and their frequency per window, most frequent
/// first, ties by ascending value.
pub fn order_values_by_event(
    orders: &[OrderRecord],
    events: &[EventRecord],
) -> Result<Vec<OrderValueRow>, ReportError> {
    let plan = WindowPlan::from_events(events)?;
    let points = paid_order_points(orders)?;

    let mut rows = Vec::new();
    for window in plan.windows() {
        let values = points
            .iter()
            .filter(|(instant, _)| window.contains(*instant))
            .map(|(_, value)| *value);
        push_frequencies(&mut rows, window, value_frequencies(values));
    }

    if let Some(grouped) = plan.grouped_window() {
        let values = points
            .iter()
            .filter(|(instant, _)| plan.gaps().iter().any(|gap| gap.contains(*instant)))
            .map(|(_, value)| *value);
        push_frequencies(&mut rows, &grouped, value_frequencies(values));
    }
    Ok(rows)
}

fn value_frequencies(values: impl Iterator<Item = f64>) -> Vec<(f64, u64)> {
    let mut frequencies: Vec<(f64, u64)> = Vec::new();
    for value in values {
        // Collapse -0.0 into 0.0 so both land in one bucket.
        let value = if value == 0.0 { 0.0 } else { value };
        match frequencies
            .iter_mut()
            .find(|(seen, _)| seen.to_bits() == value.to_bits())
        {
            Some((_, quantity)) => *quantity += 1,
            None => frequencies.push((value, 1)),
        }
    }
    frequencies.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.total_cmp(&b.0)));
    frequencies
}

fn push_frequencies(rows: &mut Vec<OrderValueRow>, window: &Window, frequencies: Vec<(f64, u64)>) {
    rows.extend(
        frequencies
            .into_iter()
            .map(|(value, quantity)| OrderValueRow {
                window: window.label.clone(),
                kind: window.kind,
                value,
                quantity,
            }),
    );
}

/// Match totals per user in first-appearance order.
fn match_counts_by_user<'a>(
    matches: impl Iterator<Item = (usize, &'a MatchRecord)>,
) -> Result<Vec<(UserId, u64)>, ReportError> {
    let mut positions: HashMap<UserId, usize> = HashMap::new();
    let mut counts: Vec<(UserId, u64)> = Vec::new();
    for (index, record) in matches {
        let user_id = require(&record.user_id, MATCHES, "userId", index)?;
        match positions.get(user_id) {
            Some(&position) => counts[position].1 += 1,
            None => {
                positions.insert(user_id.clone(), counts.len());
                counts.push((user_id.clone(), 1));
            }
        }
    }
    Ok(counts)
}

/// Highest counts first; the sort is stable so ties keep first appearance.
fn rank(mut counts: Vec<(UserId, u64)>, limit: usize) -> Vec<(UserId, u64)> {
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts.truncate(limit);
    counts
}

/// First nickname seen per user id; users without an id cannot be joined.
fn nickname_index(users: &[UserRecord]) -> HashMap<&UserId, &str> {
    let mut index = HashMap::new();
    for user in users {
        let Some(id) = user.id.as_ref() else {
            continue;
        };
        let nickname = user.nickname.as_deref().unwrap_or("");
        index.entry(id).or_insert(nickname);
    }
    index
}

fn display_nickname(index: &HashMap<&UserId, &str>, user_id: &UserId) -> String {
    match index.get(user_id) {
        Some(nickname) if !nickname.trim().is_empty() => nickname.to_string(),
        _ => UNKNOWN_NICKNAME.to_string(),
    }
}

pub fn heavy_users(
    matches: &[MatchRecord],
    users: &[UserRecord],
    limit: usize,
) -> Result<Vec<HeavyUserRow>, ReportError> {
    let counts = match_counts_by_user(matches.iter().enumerate())?;
    let nicknames = nickname_index(users);
    Ok(rank(counts, limit)
        .into_iter()
        .enumerate()
        .map(|(position, (user_id, total_matches))| HeavyUserRow {
            rank: position + 1,
            nickname: display_nickname(&nicknames, &user_id),
            user_id,
            total_matches,
        })
        .collect())
}

/// Top users by matches inside `[start, end]`, each with a per-day, per-game
/// breakdown restricted to the same window.
pub fn event_top_users(
    matches: &[MatchRecord],
    users: &[UserRecord],
    params: &EventWindowParams,
) -> Result<EventTopUsersReport, ReportError> {
    if params.end < params.start {
        return Err(ReportError::InvalidParameter(format!(
            "window end {} precedes start {}",
            params.end, params.start
        )));
    }

    let mut in_window = Vec::new();
    for (index, record) in matches.iter().enumerate() {
        let created_at = *require(&record.created_at, MATCHES, "createdAt", index)?;
        if params.start <= created_at && created_at <= params.end {
            in_window.push((index, record));
        }
    }

    let counts = match_counts_by_user(in_window.iter().copied())?;
    let nicknames = nickname_index(users);
    let mut top = Vec::new();
    for (position, (user_id, total_matches)) in rank(counts, params.limit).into_iter().enumerate() {
        let mut daily: BTreeMap<(NaiveDate, GameId), u64> = BTreeMap::new();
        for &(index, record) in &in_window {
            if record.user_id.as_ref() != Some(&user_id) {
                continue;
            }
            let created_at = require(&record.created_at, MATCHES, "createdAt", index)?;
            let game_id = require(&record.game_id, MATCHES, "gameId", index)?;
            *daily
                .entry((created_at.date_naive(), game_id.clone()))
                .or_default() += 1;
        }
        top.push(EventTopUser {
            rank: position + 1,
            nickname: display_nickname(&nicknames, &user_id),
            user_id,
            total_matches,
            daily: daily
                .into_iter()
                .map(|((date, game_id), matches)| DailyGameCount {
                    date,
                    game: game_id.label(),
                    game_id,
                    matches,
                })
                .collect(),
        });
    }

    Ok(EventTopUsersReport {
        title: params.title.clone(),
        start: params.start,
        end: params.end,
        users: top,
    })
}

pub fn ticket_total(tickets: &[TicketRecord]) -> Result<i64, ReportError> {
    let mut total = 0_i64;
    for (index, record) in tickets.iter().enumerate() {
        let amount = require(&record.amount, TICKETS, "amount", index)?;
        add_amount(&mut total, *amount, TICKETS, "amount")?;
    }
    Ok(total)
}

pub fn tickets_by_level(total: i64) -> Vec<LevelShare> {
    DIFFICULTY_LEVELS
        .iter()
        .map(|(level, share)| LevelShare {
            level: level.to_string(),
            share: *share,
            tickets: round2(total as f64 * share),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::WindowKind;
    use crate::value_objects::PaymentStatus;
    use chrono::TimeZone;

    fn at(month: u32, day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, month, day, 12, 0, 0).unwrap()
    }

    fn game_match(user: &str, game: &str, created_at: DateTime<Utc>) -> MatchRecord {
        MatchRecord {
            id: None,
            user_id: Some(UserId::from(user)),
            game_id: Some(GameId::from(game)),
            created_at: Some(created_at),
        }
    }

    fn ticket(game: &str, amount: i64, created_at: DateTime<Utc>) -> TicketRecord {
        TicketRecord {
            id: None,
            user_id: Some(UserId::from("u1")),
            game_id: Some(GameId::from(game)),
            amount: Some(amount),
            created_at: Some(created_at),
        }
    }

    fn user(id: &str, nickname: Option<&str>) -> UserRecord {
        UserRecord {
            id: Some(UserId::from(id)),
            nickname: nickname.map(str::to_string),
            created_at: Some(at(1, 1)),
        }
    }

    fn order(total: f64, status: &str, created_at: DateTime<Utc>) -> OrderRecord {
        OrderRecord {
            id: None,
            user_id: None,
            total_amount: Some(total),
            payment_status: Some(PaymentStatus::from(status)),
            created_at: Some(created_at),
        }
    }

    fn event(title: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> EventRecord {
        EventRecord {
            title: Some(title.to_string()),
            start_date: Some(start),
            end_date: Some(end),
        }
    }

    #[test]
    fn growth_buckets_by_month() {
        let matches = vec![
            game_match("u1", "1", at(1, 3)),
            game_match("u2", "1", at(1, 20)),
            game_match("u1", "2", at(2, 1)),
        ];
        let tickets = vec![ticket("1", 5, at(1, 3)), ticket("2", 7, at(3, 1))];
        let users = vec![user("u1", Some("ana"))];
        let report = growth_report(&matches, &tickets, &users).expect("growth");
        assert_eq!(
            report.matches_per_month,
            vec![
                MonthlyValue { month: "2024-01".to_string(), value: 2 },
                MonthlyValue { month: "2024-02".to_string(), value: 1 },
            ]
        );
        assert_eq!(report.ticket_amount_per_month[1].value, 7);
        assert_eq!(report.users_per_month.len(), 1);
    }

    #[test]
    fn growth_reports_missing_created_at() {
        let mut record = game_match("u1", "1", at(1, 1));
        record.created_at = None;
        let err = growth_report(&[record], &[], &[]).expect_err("missing field");
        assert_eq!(
            err,
            ReportError::MissingField { table: "gamehistories", field: "createdAt", index: 0 }
        );
    }

    #[test]
    fn tickets_by_game_relabels_known_ids() {
        let tickets = vec![
            ticket("2", 3, at(1, 1)),
            ticket("1", 4, at(1, 1)),
            ticket("9", 1, at(1, 1)),
            ticket("1", 6, at(1, 2)),
        ];
        let totals = tickets_by_game(&tickets).expect("totals");
        let labels: Vec<(&str, i64)> = totals.iter().map(|t| (t.game.as_str(), t.amount)).collect();
        assert_eq!(labels, vec![("The Runner", 10), ("Day One", 3), ("9", 1)]);
    }

    #[test]
    fn pivot_fills_missing_cells_with_zero() {
        let tickets = vec![ticket("1", 4, at(1, 1)), ticket("3", 2, at(2, 1))];
        let pivot = tickets_by_game_month(&tickets).expect("pivot");
        assert_eq!(pivot.games, vec!["The Runner", "Lava Rush"]);
        assert_eq!(pivot.rows[0].amounts, vec![4, 0]);
        assert_eq!(pivot.rows[1].amounts, vec![0, 2]);
    }

    #[test]
    fn event_summary_splits_matches_and_tickets() {
        let events = vec![
            event("E1", at(1, 1), at(1, 5)),
            event("E2", at(1, 10), at(1, 15)),
        ];
        let matches = vec![game_match("u1", "1", at(1, 2)), game_match("u1", "1", at(1, 7))];
        let tickets = vec![ticket("1", 10, at(1, 2)), ticket("1", 4, at(1, 8))];
        let rows = event_summary(&matches, &tickets, &events).expect("summary");
        assert_eq!(rows.len(), 4);
        assert_eq!((rows[0].count, rows[0].sum), (1, 10));
        assert_eq!(rows[2].label, "Interval 1");
        assert_eq!((rows[2].count, rows[2].sum), (1, 4));
        assert_eq!(rows[3].kind, WindowKind::GroupedIntervals);
        assert_eq!(rows, event_summary(&matches, &tickets, &events).expect("again"));
    }

    #[test]
    fn orders_by_event_counts_paid_orders_only() {
        let events = vec![event("E1", at(1, 1), at(1, 5))];
        let orders = vec![
            order(10.126, "paid", at(1, 2)),
            order(5.0, "paid", at(1, 3)),
            order(99.0, "pending", at(1, 3)),
        ];
        let rows = orders_by_event(&orders, &events).expect("orders");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].count, 2);
        assert_eq!(rows[0].sum, 15.13);
    }

    #[test]
    fn order_values_are_sorted_by_frequency_then_value() {
        let events = vec![
            event("E1", at(1, 1), at(1, 5)),
            event("E2", at(1, 10), at(1, 15)),
        ];
        let orders = vec![
            order(20.0, "paid", at(1, 1)),
            order(10.0, "paid", at(1, 2)),
            order(30.0, "paid", at(1, 3)),
            order(30.0, "paid", at(1, 4)),
            order(7.5, "paid", at(1, 7)),
        ];
        let rows = order_values_by_event(&orders, &events).expect("values");
        let event_rows: Vec<(f64, u64)> = rows
            .iter()
            .filter(|row| row.window == "E1")
            .map(|row| (row.value, row.quantity))
            .collect();
        assert_eq!(event_rows, vec![(30.0, 2), (10.0, 1), (20.0, 1)]);
        assert!(rows
            .iter()
            .any(|row| row.kind == WindowKind::GroupedIntervals && row.value == 7.5));
    }

    #[test]
    fn missing_payment_status_fails_the_report() {
        let mut record = order(1.0, "paid", at(1, 1));
        record.payment_status = None;
        let err = orders_by_event(&[record], &[]).expect_err("missing status");
        assert!(matches!(err, ReportError::MissingField { field: "paymentStatus", .. }));
    }

    #[test]
    fn heavy_users_rank_with_stable_ties() {
        let matches = vec![
            game_match("b", "1", at(1, 1)),
            game_match("a", "1", at(1, 1)),
            game_match("c", "1", at(1, 1)),
            game_match("c", "1", at(1, 2)),
            game_match("a", "1", at(1, 3)),
            game_match("b", "1", at(1, 4)),
            game_match("d", "1", at(1, 4)),
        ];
        let users = vec![user("a", Some("alice")), user("b", Some("  ")), user("c", None)];
        let rows = heavy_users(&matches, &users, 3).expect("heavy users");
        let ranked: Vec<(&str, &str, u64)> = rows
            .iter()
            .map(|row| (row.user_id.as_str(), row.nickname.as_str(), row.total_matches))
            .collect();
        assert_eq!(
            ranked,
            vec![("b", UNKNOWN_NICKNAME, 2), ("a", "alice", 2), ("c", UNKNOWN_NICKNAME, 2)]
        );
        assert_eq!(rows[2].rank, 3);

        let all = heavy_users(&matches, &users, 30).expect("heavy users");
        assert_eq!(all.len(), 4);
        assert!(all.iter().all(|row| !row.nickname.trim().is_empty()));
    }

    #[test]
    fn reports_are_deterministic_over_the_same_tables() {
        let matches = vec![
            game_match("a", "1", at(1, 2)),
            game_match("b", "2", at(1, 7)),
            game_match("a", "3", at(2, 1)),
        ];
        let tickets = vec![ticket("1", 4, at(1, 2)), ticket("2", 6, at(1, 8))];
        let users = vec![user("a", Some("alice")), user("b", None)];
        let events = vec![event("E1", at(1, 1), at(1, 3)), event("E2", at(1, 10), at(1, 12))];

        assert_eq!(
            growth_report(&matches, &tickets, &users).expect("growth"),
            growth_report(&matches, &tickets, &users).expect("growth")
        );
        assert_eq!(
            event_summary(&matches, &tickets, &events).expect("summary"),
            event_summary(&matches, &tickets, &events).expect("summary")
        );
        assert_eq!(
            heavy_users(&matches, &users, 10).expect("heavy users"),
            heavy_users(&matches, &users, 10).expect("heavy users")
        );
    }

    #[test]
    fn event_top_users_breaks_down_by_day_and_game() {
        let matches = vec![
            game_match("a", "2", at(12, 14)),
            game_match("a", "1", at(12, 13)),
            game_match("a", "1", at(12, 13)),
            game_match("b", "3", at(12, 20)),
            game_match("a", "4", at(12, 30)),
        ];
        let users = vec![user("a", Some("alice"))];
        let params = EventWindowParams {
            title: "Natal".to_string(),
            start: Utc.with_ymd_and_hms(2024, 12, 13, 0, 0, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2024, 12, 24, 23, 59, 59).unwrap(),
            limit: 10,
        };
        let report = event_top_users(&matches, &users, &params).expect("top users");
        assert_eq!(report.users.len(), 2);
        let top = &report.users[0];
        assert_eq!(top.nickname, "alice");
        assert_eq!(top.total_matches, 3);
        let daily: Vec<(u32, &str, u64)> = top
            .daily
            .iter()
            .map(|d| (chrono::Datelike::day(&d.date), d.game.as_str(), d.matches))
            .collect();
        assert_eq!(daily, vec![(13, "The Runner", 2), (14, "Day One", 1)]);
        assert_eq!(report.users[1].nickname, UNKNOWN_NICKNAME);
    }

    #[test]
    fn event_top_users_keeps_only_the_top_limit() {
        let matches = vec![
            game_match("b", "2", at(12, 15)),
            game_match("a", "1", at(12, 14)),
            game_match("a", "1", at(12, 16)),
            game_match("c", "3", at(12, 17)),
        ];
        let params = EventWindowParams {
            title: "Natal".to_string(),
            start: Utc.with_ymd_and_hms(2024, 12, 13, 0, 0, 0).unwrap(),
            end: Utc.with_ymd_and_hms(2024, 12, 24, 23, 59, 59).unwrap(),
            limit: 1,
        };
        let report = event_top_users(&matches, &[], &params).expect("top users");
        assert_eq!(report.users.len(), 1);
        let top = &report.users[0];
        assert_eq!(top.user_id, UserId::from("a"));
        assert_eq!(top.total_matches, 2);
        assert!(top.daily.iter().all(|day| day.game_id == GameId::from("1")));
        assert_eq!(top.daily.iter().map(|day| day.matches).sum::<u64>(), 2);
    }

    #[test]
    fn ticket_totals_fail_instead_of_wrapping() {
        let raw = serde_json::json!([
            {"gameId": "1", "amount": {"$numberLong": "9223372036854775807"}, "createdAt": 1704110400000_i64},
            {"gameId": "1", "amount": {"$numberInt": "1"}, "createdAt": 1704110400000_i64}
        ]);
        let tickets = crate::services::normalize_tickets(Some(&raw)).expect("tickets");
        let overflow = ReportError::Overflow {
            table: TICKETS,
            field: "amount",
        };

        assert_eq!(tickets_by_game(&tickets), Err(overflow.clone()));
        assert_eq!(tickets_by_game_month(&tickets).map(|_| ()), Err(overflow.clone()));
        assert_eq!(growth_report(&[], &tickets, &[]).map(|_| ()), Err(overflow.clone()));
        assert_eq!(ticket_total(&tickets), Err(overflow.clone()));

        let events = vec![event("E1", at(1, 1), at(1, 2))];
        assert_eq!(event_summary(&[], &tickets, &events), Err(overflow));
    }

    #[test]
    fn event_top_users_rejects_inverted_window() {
        let params = EventWindowParams {
            title: "x".to_string(),
            start: at(2, 1),
            end: at(1, 1),
            limit: 10,
        };
        assert!(matches!(
            event_top_users(&[], &[], &params),
            Err(ReportError::InvalidParameter(_))
        ));
    }

    #[test]
    fn level_shares_split_total() {
        let total = ticket_total(&[ticket("1", 60, at(1, 1)), ticket("2", 40, at(1, 1))])
            .expect("total");
        let levels = tickets_by_level(total);
        let split: Vec<(&str, f64)> = levels.iter().map(|l| (l.level.as_str(), l.tickets)).collect();
        assert_eq!(
            split,
            vec![("Easy", 25.0), ("Medium", 35.0), ("Hard", 30.0), ("Extreme", 10.0)]
        );
    }
}
