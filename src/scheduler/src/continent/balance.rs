use crate::continent::MatchEdge;
use log::{debug, warn};
use std::collections::{HashMap, VecDeque};

/// Picks a host for every league-phase meeting so nobody hosts more than
/// `max_home` times.
pub struct HomeAwayBalancer {
    max_home: usize,
}

impl HomeAwayBalancer {
    pub fn new(max_home: usize) -> Self {
        HomeAwayBalancer { max_home }
    }

    /// Returns `(home, away)` for each edge, in the order given.
    pub fn assign(&self, edges: &[MatchEdge]) -> Vec<(u32, u32)> {
        let mut home_count: HashMap<u32, usize> = HashMap::new();
        let mut venues = Vec::with_capacity(edges.len());

        for edge in edges {
            let home_a = home_count.get(&edge.a).copied().unwrap_or(0);
            let home_b = home_count.get(&edge.b).copied().unwrap_or(0);

            // fewer home games hosts, lower id on a tie
            let (mut home, mut away) = if home_b < home_a { (edge.b, edge.a) } else { (edge.a, edge.b) };

            if home_count.get(&home).copied().unwrap_or(0) >= self.max_home {
                std::mem::swap(&mut home, &mut away);
            }

            *home_count.entry(home).or_default() += 1;
            venues.push((home, away));
        }

        self.repair(&mut venues, &mut home_count);

        venues
    }

    /// Moves surplus home games along host -> guest paths until every team
    /// is within the cap or no path is left.
    fn repair(&self, venues: &mut [(u32, u32)], home_count: &mut HashMap<u32, usize>) {
        let mut flips = 0;

        loop {
            let mut overloaded: Vec<u32> = home_count
                .iter()
                .filter(|(_, count)| **count > self.max_home)
                .map(|(team, _)| *team)
                .collect();
            overloaded.sort_unstable();

            let Some(&start) = overloaded.first() else {
                break;
            };

            let Some(path) = self.find_path(start, venues, home_count) else {
                warn!("home/away repair stuck at team {} with {} home games", start, home_count[&start]);
                break;
            };

            for idx in path {
                let (home, away) = venues[idx];
                venues[idx] = (away, home);

                if let Some(count) = home_count.get_mut(&home) {
                    *count -= 1;
                }
                *home_count.entry(away).or_default() += 1;
            }

            flips += 1;
        }

        if flips > 0 {
            debug!("home/away repair applied {} path flip(s)", flips);
        }
    }

    /// BFS over hosted games from `start` to any team below the cap.
    /// Returns the venue indices along the path.
    fn find_path(&self, start: u32, venues: &[(u32, u32)], home_count: &HashMap<u32, usize>) -> Option<Vec<usize>> {
        let mut hosted: HashMap<u32, Vec<usize>> = HashMap::new();
        for (idx, (home, _)) in venues.iter().enumerate() {
            hosted.entry(*home).or_default().push(idx);
        }

        let mut came_from: HashMap<u32, Option<usize>> = HashMap::from([(start, None)]);
        let mut queue = VecDeque::from([start]);

        while let Some(team) = queue.pop_front() {
            let below_cap = home_count.get(&team).copied().unwrap_or(0) < self.max_home;

            if team != start && below_cap {
                let mut path = Vec::new();
                let mut cursor = team;

                while let Some(Some(idx)) = came_from.get(&cursor) {
                    path.push(*idx);
                    cursor = venues[*idx].0;
                }

                path.reverse();
                return Some(path);
            }

            for &idx in hosted.get(&team).into_iter().flatten() {
                let guest = venues[idx].1;
                if !came_from.contains_key(&guest) {
                    came_from.insert(guest, Some(idx));
                    queue.push_back(guest);
                }
            }
        }

        None
    }
}
