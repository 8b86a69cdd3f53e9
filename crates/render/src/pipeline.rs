//! Projects quotes onto the summary slots and the installment table.
//!
//! Both renders overwrite whatever they rendered before, so repeating a render
//! with the same price leaves identical text and a newer price fully replaces
//! an older one.

use hb_core::{NodeId, PriceCents};
use hb_pricing::{CurrencyFormatter, InstallmentCalculator, InstallmentCount, format_rate};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::tree::{Marker, PresentationTree};

/// Where the pipeline writes, relative to a benefits root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlotMarkers {
    pub price: Marker,
    pub installments: Marker,
    pub points: Marker,
    pub table_body: Marker,
    /// Class added to the featured (6x) row.
    pub featured_class: String,
}

impl Default for SlotMarkers {
    fn default() -> Self {
        Self {
            price: Marker::class("hb-benefits__price"),
            installments: Marker::class("hb-benefits__installments"),
            points: Marker::class("hb-benefits__points"),
            table_body: Marker::attribute("data-hb-table-body"),
            featured_class: "hb-benefits__row--highlight".to_string(),
        }
    }
}

/// ` ou 6x de R$ 16,67`
pub fn installment_hint(per: &str) -> String {
    format!(" ou {}x de {per}", InstallmentCount::FEATURED.get())
}

/// ` e ganhe 250 pontos`
pub fn points_hint(points: u64) -> String {
    format!(" e ganhe {points} pontos")
}

#[derive(Debug, Clone, Default)]
pub struct RenderPipeline {
    calculator: InstallmentCalculator,
    formatter: CurrencyFormatter,
    slots: SlotMarkers,
}

impl RenderPipeline {
    pub fn new(
        calculator: InstallmentCalculator,
        formatter: CurrencyFormatter,
        slots: SlotMarkers,
    ) -> Self {
        Self {
            calculator,
            formatter,
            slots,
        }
    }

    pub fn formatter(&self) -> &CurrencyFormatter {
        &self.formatter
    }

    pub fn slots(&self) -> &SlotMarkers {
        &self.slots
    }

    /// Locate the table body under `root`.
    pub fn table_body<T: PresentationTree>(&self, tree: &T, root: NodeId) -> Option<NodeId> {
        tree.find(root, &self.slots.table_body)
    }

    /// Write the full price, the 6x hint and the loyalty points hint.
    ///
    /// Missing slots are skipped.
    pub fn render_summary<T: PresentationTree>(&self, tree: &mut T, root: NodeId, price: PriceCents) {
        let six = self.calculator.compute(price, InstallmentCount::FEATURED).per;
        let points = price.whole_units();

        let writes = [
            (&self.slots.price, self.formatter.format(price)),
            (&self.slots.installments, installment_hint(&self.formatter.format(six))),
            (&self.slots.points, points_hint(points)),
        ];

        for (marker, text) in writes {
            match tree.find(root, marker) {
                Some(slot) => tree.set_text(slot, &text),
                None => debug!(%root, %marker, "summary slot missing; skipped"),
            }
        }
    }

    /// Replace the table body's rows with one row per offered installment count.
    pub fn render_table<T: PresentationTree>(
        &self,
        tree: &mut T,
        table_body: Option<NodeId>,
        price: PriceCents,
    ) {
        let Some(body) = table_body.filter(|b| tree.contains(*b)) else {
            debug!("table body missing; skipped");
            return;
        };

        tree.clear_children(body);

        for quote in self.calculator.quotes(price) {
            let Some(row) = tree.append_element(body, "tr") else {
                return;
            };
            if quote.count.is_featured() {
                tree.add_class(row, &self.slots.featured_class);
            }

            let cells = [
                quote.count.to_string(),
                self.formatter.format(quote.per),
                self.formatter.format(quote.total),
                format_rate(quote.rate),
            ];
            for text in cells {
                if let Some(cell) = tree.append_element(row, "td") {
                    tree.set_text(cell, &text);
                }
            }
        }
    }
}
