//! Round-robin distribution of leads across agents.
//!
//! Pure assignment arithmetic; persistence and agent enumeration belong to
//! the callers.

use crate::errors::AppError;

/// Assign `lead_count` leads to `agents`, preserving lead order.
///
/// Leads are handed out block-sequentially: the first agent's quota is
/// filled before the second agent receives anything. Every agent receives
/// `lead_count / agents.len()` leads, except the first
/// `lead_count % agents.len()` agents which receive one extra.
///
/// Returns one entry per lead, in lead order, referencing the receiving
/// agent. Fails when `agents` is empty; the caller must not have created
/// any records by that point.
pub fn distribute<T>(lead_count: usize, agents: &[T]) -> Result<Vec<&T>, AppError> {
    if agents.is_empty() {
        return Err(AppError::Validation(
            "No agents available for distribution".to_string(),
        ));
    }

    let base = lead_count / agents.len();
    let remainder = lead_count % agents.len();

    let mut assignments = Vec::with_capacity(lead_count);
    for (i, agent) in agents.iter().enumerate() {
        let quota = if i < remainder { base + 1 } else { base };
        for _ in 0..quota {
            assignments.push(agent);
        }
    }

    Ok(assignments)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agent_ids(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("agent-{}", i)).collect()
    }

    fn counts(assignments: &[&String], agents: &[String]) -> Vec<usize> {
        agents
            .iter()
            .map(|a| assignments.iter().filter(|x| x.as_str() == a.as_str()).count())
            .collect()
    }

    #[test]
    fn test_even_split() {
        let agents = agent_ids(3);
        let assignments = distribute(6, &agents).unwrap();
        assert_eq!(assignments.len(), 6);
        assert_eq!(counts(&assignments, &agents), vec![2, 2, 2]);
    }

    #[test]
    fn test_remainder_goes_to_first_agents() {
        let agents = agent_ids(3);
        let assignments = distribute(8, &agents).unwrap();
        assert_eq!(assignments.len(), 8);
        assert_eq!(counts(&assignments, &agents), vec![3, 3, 2]);
    }

    #[test]
    fn test_order_preserving_blocks() {
        let agents = agent_ids(2);
        let assignments = distribute(5, &agents).unwrap();
        // First agent's quota is filled before the second receives anything
        assert_eq!(
            assignments,
            vec![&agents[0], &agents[0], &agents[0], &agents[1], &agents[1]]
        );
    }

    #[test]
    fn test_fewer_leads_than_agents() {
        let agents = agent_ids(4);
        let assignments = distribute(2, &agents).unwrap();
        assert_eq!(counts(&assignments, &agents), vec![1, 1, 0, 0]);
    }

    #[test]
    fn test_no_leads() {
        let agents = agent_ids(3);
        let assignments = distribute(0, &agents).unwrap();
        assert!(assignments.is_empty());
    }

    #[test]
    fn test_no_agents_fails() {
        let agents: Vec<String> = Vec::new();
        let err = distribute(4, &agents).unwrap_err();
        assert_eq!(err.message(), "No agents available for distribution");
    }

    #[test]
    fn test_share_sizes_for_all_small_inputs() {
        for lead_count in 0..=20 {
            for agent_count in 1..=6 {
                let agents = agent_ids(agent_count);
                let assignments = distribute(lead_count, &agents).unwrap();
                assert_eq!(assignments.len(), lead_count);

                let shares = counts(&assignments, &agents);
                let base = lead_count / agent_count;
                let remainder = lead_count % agent_count;
                let larger = shares.iter().filter(|&&c| c == base + 1).count();

                assert_eq!(larger, remainder);
                assert!(shares.iter().all(|&c| c == base || c == base + 1));
            }
        }
    }

    #[test]
    fn test_deterministic() {
        let agents = agent_ids(3);
        let first = distribute(7, &agents).unwrap();
        let second = distribute(7, &agents).unwrap();
        assert_eq!(first, second);
    }
}
