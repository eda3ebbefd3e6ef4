use crate::model::player::{PlayerCandidate, RolePerformance};
use crate::model::roles::ROLE_ORDER;

pub fn perf(games: u32, win_rate: f64, kda: f64, cs_per_min: f64, vision_per_min: f64) -> RolePerformance {
    RolePerformance {
        games,
        win_rate: Some(win_rate),
        kda: Some(kda),
        cs_per_min: Some(cs_per_min),
        vision_per_min: Some(vision_per_min),
        form_trend: None,
    }
}

/// Identical, fully sampled stats in every role.
pub fn average_player(id: &str) -> PlayerCandidate {
    player_with_win_rate(id, 0.50)
}

pub fn player_with_win_rate(id: &str, win_rate: f64) -> PlayerCandidate {
    let mut player = PlayerCandidate::new(id);
    for role in ROLE_ORDER {
        player = player.with_performance(role, perf(20, win_rate, 2.5, 6.0, 1.0));
    }
    player
}

pub fn average_pool(ids: &[&str]) -> Vec<PlayerCandidate> {
    ids.iter().map(|id| average_player(id)).collect()
}

/// Players whose stats differ per role so the optimum is non-trivial.
pub fn varied_pool() -> Vec<PlayerCandidate> {
    let specs: [(&str, [f64; 5]); 6] = [
        ("ana", [0.62, 0.48, 0.51, 0.45, 0.50]),
        ("ben", [0.47, 0.60, 0.49, 0.52, 0.44]),
        ("cid", [0.50, 0.46, 0.64, 0.50, 0.47]),
        ("dee", [0.45, 0.50, 0.48, 0.61, 0.52]),
        ("eli", [0.49, 0.47, 0.46, 0.50, 0.63]),
        ("fay", [0.55, 0.55, 0.55, 0.55, 0.55]),
    ];
    specs
        .iter()
        .map(|(id, rates)| {
            let mut player = PlayerCandidate::new(*id);
            for (role, rate) in ROLE_ORDER.iter().zip(rates) {
                player = player.with_performance(*role, perf(25, *rate, 2.8, 6.5, 1.2));
            }
            player
        })
        .collect()
}
