//! Summary cards shown above the chart.

use serde::Serialize;

use crate::analysis::Stats;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CardKind {
    Total,
    Spikes,
    Drops,
}

impl CardKind {
    pub fn label(self) -> &'static str {
        match self {
            CardKind::Total => "Total anomalies",
            CardKind::Spikes => "Spikes",
            CardKind::Drops => "Drops",
        }
    }
}

/// One numeric card. `max_deviation` deliberately has no card.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryCard {
    pub kind: CardKind,
    pub label: String,
    pub value: u64,
}

impl SummaryCard {
    /// The three cards, in display order: total, spikes, drops.
    pub fn from_stats(stats: &Stats) -> Vec<SummaryCard> {
        [
            (CardKind::Total, stats.total),
            (CardKind::Spikes, stats.spike_count),
            (CardKind::Drops, stats.drop_count),
        ]
        .into_iter()
        .map(|(kind, value)| SummaryCard {
            kind,
            label: kind.label().to_string(),
            value,
        })
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_cards_in_order() {
        let stats = Stats {
            total: 9,
            spike_count: 4,
            drop_count: 2,
            max_deviation: 12.5,
        };
        let cards = SummaryCard::from_stats(&stats);
        let kinds: Vec<CardKind> = cards.iter().map(|c| c.kind).collect();
        assert_eq!(kinds, vec![CardKind::Total, CardKind::Spikes, CardKind::Drops]);
        let values: Vec<u64> = cards.iter().map(|c| c.value).collect();
        assert_eq!(values, vec![9, 4, 2]);
        assert_eq!(cards[0].label, "Total anomalies");
    }
}
