use crate::continent::Pot;
use crate::settings::PairingSettings;
use itertools::Itertools;
use log::{debug, info, warn};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use std::collections::{HashMap, HashSet};

/// Pot-level perfect matchings over four pots.
const POT_MATCHINGS: [[(usize, usize); 2]; 3] = [[(0, 1), (2, 3)], [(0, 2), (1, 3)], [(0, 3), (1, 2)]];

/// Two teams that must meet once, stored with `a < b`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MatchEdge {
    pub a: u32,
    pub b: u32,
}

impl MatchEdge {
    pub fn new(x: u32, y: u32) -> Option<Self> {
        match x.cmp(&y) {
            std::cmp::Ordering::Less => Some(MatchEdge { a: x, b: y }),
            std::cmp::Ordering::Greater => Some(MatchEdge { a: y, b: x }),
            std::cmp::Ordering::Equal => None,
        }
    }

    pub fn touches(&self, team_id: u32) -> bool {
        self.a == team_id || self.b == team_id
    }
}

/// The fixed set of league-phase meetings built from the pots.
#[derive(Debug, Clone)]
pub struct PairingGraph {
    pub teams: Vec<u32>,
    pub edges: Vec<MatchEdge>,
}

impl PairingGraph {
    /// Intra-pot: `i - (i + 1) mod n`. Inter-pot, for every pot pair:
    /// `A[i] - B[i]` and `A[i] - B[i + 1]`. With four equal pots of three
    /// or more teams every team ends up with two opponents from each pot.
    pub fn from_pots(pots: &[Pot]) -> Self {
        let mut seen = HashSet::new();
        let mut edges = Vec::new();

        let mut push = |x: u32, y: u32| {
            if let Some(edge) = MatchEdge::new(x, y) {
                if seen.insert(edge) {
                    edges.push(edge);
                }
            }
        };

        for pot in pots {
            let n = pot.team_ids.len();
            for i in 0..n {
                push(pot.team_ids[i], pot.team_ids[(i + 1) % n]);
            }
        }

        for (pot_a, pot_b) in pots.iter().tuple_combinations() {
            let m = pot_b.team_ids.len();
            if m == 0 {
                continue;
            }

            for (i, &team) in pot_a.team_ids.iter().enumerate() {
                push(team, pot_b.team_ids[i % m]);
                push(team, pot_b.team_ids[(i + 1) % m]);
            }
        }

        let teams = pots.iter().flat_map(|p| p.team_ids.iter().copied()).collect();

        PairingGraph { teams, edges }
    }

    pub fn degree(&self, team_id: u32) -> usize {
        self.edges.iter().filter(|e| e.touches(team_id)).count()
    }

    /// Whether `rounds` perfect matchings can cover the graph at all.
    pub fn is_regular(&self, rounds: usize) -> bool {
        self.teams.len() % 2 == 0 && self.teams.iter().all(|&t| self.degree(t) == rounds)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairingStrategy {
    /// Randomized MRV backtracking
    Search,
    /// 1-factorization built directly from the pot structure
    Constructive,
    /// Edges dealt out by index; rounds may not be perfect matchings
    Sequential,
}

#[derive(Debug, Clone)]
pub struct PairingSchedule {
    pub edges: Vec<MatchEdge>,
    /// Round of each edge, parallel to `edges`
    pub assignment: Vec<u8>,
    pub rounds: u8,
    pub strategy: PairingStrategy,
    pub attempts: u32,
}

impl PairingSchedule {
    pub fn is_degraded(&self) -> bool {
        self.strategy == PairingStrategy::Sequential
    }

    pub fn round(&self, round: u8) -> Vec<MatchEdge> {
        self.edges
            .iter()
            .zip(&self.assignment)
            .filter(|(_, r)| **r == round)
            .map(|(e, _)| *e)
            .collect()
    }

    pub fn by_round(&self) -> Vec<Vec<MatchEdge>> {
        (0..self.rounds).map(|r| self.round(r)).collect()
    }
}

/// Team-index view of the graph used by the search.
struct IndexedGraph {
    ends: Vec<(usize, usize)>,
    incident: Vec<Vec<usize>>,
}

impl IndexedGraph {
    fn new(graph: &PairingGraph) -> Self {
        let index: HashMap<u32, usize> = graph.teams.iter().enumerate().map(|(i, t)| (*t, i)).collect();

        let mut incident = vec![Vec::new(); graph.teams.len()];
        let ends = graph
            .edges
            .iter()
            .enumerate()
            .map(|(e, edge)| {
                let (a, b) = (index[&edge.a], index[&edge.b]);
                incident[a].push(e);
                incident[b].push(e);
                (a, b)
            })
            .collect();

        IndexedGraph { ends, incident }
    }

    fn other(&self, edge: usize, team: usize) -> usize {
        let (a, b) = self.ends[edge];
        if a == team { b } else { a }
    }
}

/// One round's perfect-matching search.
struct RoundSearch<'g> {
    graph: &'g IndexedGraph,
    consumed: &'g [bool],
    order: Vec<usize>,
    busy: Vec<bool>,
    chosen: Vec<usize>,
    nodes: u64,
    budget: u64,
}

impl RoundSearch<'_> {
    fn candidates(&self, team: usize) -> Vec<usize> {
        self.graph.incident[team]
            .iter()
            .copied()
            .filter(|&e| !self.consumed[e] && !self.busy[self.graph.other(e, team)])
            .collect()
    }

    fn solve(&mut self, rng: &mut StdRng) -> bool {
        self.nodes += 1;
        if self.nodes > self.budget {
            return false;
        }

        // MRV; ties go to the earliest team in the shuffled order
        let mut best: Option<(usize, Vec<usize>)> = None;
        for &team in &self.order {
            if self.busy[team] {
                continue;
            }

            let candidates = self.candidates(team);
            if candidates.is_empty() {
                return false;
            }

            if best.as_ref().is_none_or(|(_, c)| candidates.len() < c.len()) {
                best = Some((team, candidates));
            }
        }

        let Some((team, mut candidates)) = best else {
            return true;
        };

        candidates.shuffle(rng);

        for edge in candidates {
            let opponent = self.graph.other(edge, team);

            self.busy[team] = true;
            self.busy[opponent] = true;
            self.chosen.push(edge);

            if self.solve(rng) {
                return true;
            }

            self.chosen.pop();
            self.busy[team] = false;
            self.busy[opponent] = false;
        }

        false
    }
}

pub struct SwissPairingSolver<'s> {
    settings: &'s PairingSettings,
}

impl<'s> SwissPairingSolver<'s> {
    pub fn new(settings: &'s PairingSettings) -> Self {
        SwissPairingSolver { settings }
    }

    pub fn solve(&self, pots: &[Pot], rng: &mut StdRng) -> PairingSchedule {
        let graph = PairingGraph::from_pots(pots);
        let rounds = self.settings.rounds;

        info!(
            "🎲 league phase draw: {} teams, {} meetings over {} rounds",
            graph.teams.len(),
            graph.edges.len(),
            rounds
        );

        let mut attempts = 0;

        if graph.is_regular(rounds as usize) {
            let indexed = IndexedGraph::new(&graph);

            while attempts < self.settings.max_attempts {
                attempts += 1;

                if let Some(assignment) = self.search(&indexed, graph.teams.len(), rng) {
                    debug!("league phase solved by search after {} attempt(s)", attempts);
                    return self.schedule(graph, assignment, PairingStrategy::Search, attempts);
                }
            }

            debug!("search exhausted after {} attempts", attempts);
        } else {
            debug!("pairing graph is not {}-regular, skipping search", rounds);
        }

        if let Some(assignment) = Self::constructive(pots, &graph, rounds, rng) {
            info!("league phase solved constructively after {} failed attempt(s)", attempts);
            return self.schedule(graph, assignment, PairingStrategy::Constructive, attempts);
        }

        warn!(
            "⚠️ league phase pairing degraded: sequential round assignment for {} teams, rounds may not be perfect matchings",
            graph.teams.len()
        );

        let assignment = (0..graph.edges.len()).map(|e| (e % rounds.max(1) as usize) as u8).collect();

        self.schedule(graph, assignment, PairingStrategy::Sequential, attempts)
    }

    fn schedule(
        &self,
        graph: PairingGraph,
        assignment: Vec<u8>,
        strategy: PairingStrategy,
        attempts: u32,
    ) -> PairingSchedule {
        PairingSchedule {
            edges: graph.edges,
            assignment,
            rounds: self.settings.rounds,
            strategy,
            attempts,
        }
    }

    /// One full attempt: every round must be solved in turn; any dead end
    /// abandons the attempt.
    fn search(&self, graph: &IndexedGraph, teams_count: usize, rng: &mut StdRng) -> Option<Vec<u8>> {
        let mut consumed = vec![false; graph.ends.len()];
        let mut assignment = vec![u8::MAX; graph.ends.len()];
        let mut nodes = 0;

        for round in 0..self.settings.rounds {
            let mut order: Vec<usize> = (0..teams_count).collect();
            order.shuffle(rng);

            let mut round_search = RoundSearch {
                graph,
                consumed: &consumed,
                order,
                busy: vec![false; teams_count],
                chosen: Vec::with_capacity(teams_count / 2),
                nodes,
                budget: self.settings.search_node_budget,
            };

            if !round_search.solve(rng) {
                debug!("round {} has no perfect matching left", round + 1);
                return None;
            }

            nodes = round_search.nodes;
            let chosen = round_search.chosen;

            for edge in chosen {
                consumed[edge] = true;
                assignment[edge] = round;
            }
        }

        assignment.iter().all(|r| *r != u8::MAX).then_some(assignment)
    }

    /// Direct 1-factorization for four equal pots of even size: two rounds
    /// from the intra-pot cycles, six from the three pot pairings with two
    /// shifts each. Round order is shuffled.
    fn constructive(pots: &[Pot], graph: &PairingGraph, rounds: u8, rng: &mut StdRng) -> Option<Vec<u8>> {
        let n = pots.first()?.team_ids.len();
        let uniform = pots.len() == 4 && pots.iter().all(|p| p.team_ids.len() == n);

        if !uniform || n < 4 || n % 2 != 0 || rounds != 8 {
            return None;
        }

        let mut matchings: Vec<Vec<MatchEdge>> = Vec::with_capacity(8);

        for parity in 0..2 {
            let round = pots
                .iter()
                .flat_map(|pot| {
                    (parity..n)
                        .step_by(2)
                        .filter_map(move |i| MatchEdge::new(pot.team_ids[i], pot.team_ids[(i + 1) % n]))
                })
                .collect();
            matchings.push(round);
        }

        for pairs in POT_MATCHINGS {
            for shift in 0..2 {
                let round = pairs
                    .iter()
                    .flat_map(|&(a, b)| {
                        (0..n).filter_map(move |i| MatchEdge::new(pots[a].team_ids[i], pots[b].team_ids[(i + shift) % n]))
                    })
                    .collect();
                matchings.push(round);
            }
        }

        matchings.shuffle(rng);

        let index: HashMap<MatchEdge, usize> = graph.edges.iter().enumerate().map(|(i, e)| (*e, i)).collect();
        let mut assignment = vec![u8::MAX; graph.edges.len()];

        for (round, matching) in matchings.iter().enumerate() {
            for edge in matching {
                let slot = assignment.get_mut(*index.get(edge)?)?;
                if *slot != u8::MAX {
                    return None;
                }
                *slot = round as u8;
            }
        }

        assignment.iter().all(|r| *r != u8::MAX).then_some(assignment)
    }
}
