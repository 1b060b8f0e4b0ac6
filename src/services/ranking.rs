// src/services/ranking.rs

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap};

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::{
    common::money::Money,
    models::dashboard::RankedEntry,
    services::growth::growth,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Rankings {
    pub top: Vec<RankedEntry>,
    pub bottom: Vec<RankedEntry>,
}

pub struct PerformerRanker;

impl PerformerRanker {
    /// Top-N (maior venda primeiro) e bottom-N (menor venda primeiro).
    ///
    /// Empates são decididos pelo id da franquia, em ordem crescente, nas duas listas.
    /// As listas são independentes e podem se sobrepor quando há até 2N franquias.
    /// O crescimento de cada entrada usa o anterior DA PRÓPRIA franquia (zero se não houve).
    pub fn rank(
        current: &BTreeMap<Uuid, Money>,
        previous: &BTreeMap<Uuid, Money>,
        names: &HashMap<Uuid, String>,
        n: usize,
    ) -> Rankings {
        let mut ordered: Vec<(Uuid, Money)> = current.iter().map(|(id, sales)| (*id, *sales)).collect();

        ordered.sort_by(by_sales_desc);
        let top = ordered
            .iter()
            .take(n)
            .map(|(id, sales)| Self::entry(*id, *sales, previous, names))
            .collect();

        ordered.sort_by(|a, b| a.1.cmp(&b.1).then(a.0.cmp(&b.0)));
        let bottom = ordered
            .iter()
            .take(n)
            .map(|(id, sales)| Self::entry(*id, *sales, previous, names))
            .collect();

        Rankings { top, bottom }
    }

    fn entry(
        franchise_id: Uuid,
        sales: Money,
        previous: &BTreeMap<Uuid, Money>,
        names: &HashMap<Uuid, String>,
    ) -> RankedEntry {
        let previous_sales = previous.get(&franchise_id).copied().unwrap_or(Decimal::ZERO);
        RankedEntry {
            franchise_id,
            display_name: names
                .get(&franchise_id)
                .cloned()
                .unwrap_or_else(|| franchise_id.to_string()),
            sales,
            growth: growth(sales, previous_sales),
        }
    }
}

fn by_sales_desc(a: &(Uuid, Money), b: &(Uuid, Money)) -> Ordering {
    b.1.cmp(&a.1).then(a.0.cmp(&b.0))
}
