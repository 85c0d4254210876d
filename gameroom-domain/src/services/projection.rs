// Client projection
//
// Scales observed per-user averages on the selected games up to a target
// client base over a number of weeks.

use std::collections::HashSet;

use crate::entities::{
    ClientProjection, GameShare, MatchRecord, ProjectionParams, TicketRecord,
    PARTICIPATION_PERCENTAGE,
};
use crate::errors::{add_amount, require, ReportError};
use crate::utils::round2;
use crate::value_objects::{GameId, UserId};

pub fn project_clients(
    matches: &[MatchRecord],
    tickets: &[TicketRecord],
    params: &ProjectionParams,
) -> Result<ClientProjection, ReportError> {
    if !PARTICIPATION_PERCENTAGE.contains(&params.percentage) {
        return Err(ReportError::InvalidParameter(format!(
            "percentage must be within 1..=100, got {}",
            params.percentage
        )));
    }

    let adjusted_clients = params.clients as f64 * params.percentage / 100.0;
    let selected: Vec<GameId> = params.games.iter().map(|game| GameId::from(*game)).collect();

    let mut selected_matches = Vec::new();
    for (index, record) in matches.iter().enumerate() {
        let game_id = require(&record.game_id, "gamehistories", "gameId", index)?;
        if selected.contains(game_id) {
            selected_matches.push((index, record, game_id));
        }
    }
    let mut selected_tickets = Vec::new();
    for (index, record) in tickets.iter().enumerate() {
        let game_id = require(&record.game_id, "tickets", "gameId", index)?;
        if selected.contains(game_id) {
            let amount = *require(&record.amount, "tickets", "amount", index)?;
            selected_tickets.push((index, record, game_id, amount));
        }
    }

    if selected_matches.is_empty() || selected_tickets.is_empty() {
        return Ok(ClientProjection {
            adjusted_clients,
            weeks: params.weeks,
            avg_matches_per_user: 0.0,
            avg_ticket_value_per_user: 0.0,
            projected_matches: 0.0,
            projected_tickets: 0.0,
            infra_cost: 0.0,
            per_game: Vec::new(),
        });
    }

    let mut players: HashSet<&UserId> = HashSet::new();
    for (index, record, _) in &selected_matches {
        players.insert(require(&record.user_id, "gamehistories", "userId", *index)?);
    }
    let mut buyers: HashSet<&UserId> = HashSet::new();
    for (index, record, _, _) in &selected_tickets {
        buyers.insert(require(&record.user_id, "tickets", "userId", *index)?);
    }

    let match_count = selected_matches.len() as f64;
    let ticket_sum = sum_amounts(selected_tickets.iter().map(|(_, _, _, amount)| *amount))?;
    let avg_matches_per_user = match_count / players.len() as f64;
    let avg_ticket_value_per_user = ticket_sum as f64 / buyers.len() as f64;

    let scale = adjusted_clients * params.weeks as f64;
    let projected_matches = avg_matches_per_user * scale;
    let projected_tickets = avg_ticket_value_per_user * scale;

    let per_game = params
        .games
        .iter()
        .map(|game| -> Result<GameShare, ReportError> {
            let game_id = GameId::from(*game);
            let game_matches = selected_matches
                .iter()
                .filter(|(_, _, id)| **id == game_id)
                .count() as f64;
            let game_tickets = sum_amounts(
                selected_tickets
                    .iter()
                    .filter(|(_, _, id, _)| **id == game_id)
                    .map(|(_, _, _, amount)| *amount),
            )?;
            Ok(GameShare {
                game: game.name().to_string(),
                match_share_pct: round2(game_matches / match_count * 100.0),
                ticket_share_pct: if ticket_sum > 0 {
                    round2(game_tickets as f64 / ticket_sum as f64 * 100.0)
                } else {
                    0.0
                },
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ClientProjection {
        adjusted_clients,
        weeks: params.weeks,
        avg_matches_per_user: round2(avg_matches_per_user),
        avg_ticket_value_per_user: round2(avg_ticket_value_per_user),
        projected_matches: round2(projected_matches),
        projected_tickets: round2(projected_tickets),
        infra_cost: round2(projected_matches * params.cost_per_match),
        per_game,
    })
}

fn sum_amounts(amounts: impl Iterator<Item = i64>) -> Result<i64, ReportError> {
    let mut total = 0_i64;
    for amount in amounts {
        add_amount(&mut total, amount, "tickets", "amount")?;
    }
    Ok(total)
}
