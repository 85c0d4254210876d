use anyhow::{anyhow, Result};

use gameroom_domain::{parse_bound, PARTICIPATION_PERCENTAGE};

pub fn validate_bind_addr(value: &str) -> Result<()> {
    value
        .parse::<std::net::SocketAddr>()
        .map_err(|err| anyhow!("invalid bind_addr '{}': {}", value, err))?;
    Ok(())
}

pub fn validate_limit(name: &str, value: usize) -> Result<()> {
    if value == 0 {
        return Err(anyhow!("{} must be greater than 0", name));
    }
    Ok(())
}

pub fn validate_percentage(value: f64) -> Result<()> {
    if !PARTICIPATION_PERCENTAGE.contains(&value) {
        return Err(anyhow!("projection.percentage must be within 1..=100, got {}", value));
    }
    Ok(())
}

/// Featured event bounds must parse and be ordered.
pub fn validate_event_window(start: &str, end: &str) -> Result<()> {
    let start_at = parse_bound(start, false)
        .map_err(|err| anyhow!("invalid featured_event.start '{}': {}", start, err))?;
    let end_at = parse_bound(end, true)
        .map_err(|err| anyhow!("invalid featured_event.end '{}': {}", end, err))?;
    if end_at < start_at {
        return Err(anyhow!("featured_event.end precedes featured_event.start"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_out_of_range_values() {
        assert!(validate_bind_addr("localhost").is_err());
        assert!(validate_bind_addr("0.0.0.0:8501").is_ok());
        assert!(validate_limit("heavy_users_limit", 0).is_err());
        assert!(validate_percentage(0.0).is_err());
        assert!(validate_percentage(100.0).is_ok());
        assert!(validate_event_window("2024-12-24", "2024-12-13").is_err());
        assert!(validate_event_window("2024-12-13", "2024-12-13").is_ok());
    }
}
