use anyhow::{Context, Result};
use serde_json::json;

use hb_core::NodeId;
use hb_events::{EventBus, ExternalEvent, InMemoryEventBus};
use hb_render::{Marker, MemoryTree, PresentationTree, ReadyState};
use hb_storefront::{BenefitsConfig, BenefitsController};

fn main() -> Result<()> {
    hb_observability::init();

    let prices = std::env::args()
        .skip(1)
        .map(|arg| {
            arg.parse::<u64>()
                .with_context(|| format!("price `{arg}` is not a whole number of cents"))
        })
        .collect::<Result<Vec<_>>>()?;
    let (initial, changes) = match prices.split_first() {
        Some((first, rest)) => (*first, rest),
        None => (10000, &[][..]),
    };

    let config = BenefitsConfig::from_env();
    config.validate()?;

    let (mut tree, root) = product_page(&config, initial)?;
    let bus = InMemoryEventBus::new();
    let mut controller = BenefitsController::with_bus(config, &bus);

    controller.auto_start(&mut tree);
    tree.set_ready_state(ReadyState::Interactive);
    bus.publish(ExternalEvent::bare("DOMContentLoaded"))
        .context("publishing DOMContentLoaded")?;

    for price in changes {
        bus.publish(ExternalEvent::new(
            "variant:change",
            json!({"variant": {"price": price}}),
        ))
        .context("publishing variant:change")?;
    }

    let handled = controller.pump(&mut tree);
    tracing::info!(handled, "notifications processed");

    print!("{}", tree.outline(root));
    Ok(())
}

/// A product page with one benefits block, still loading.
fn product_page(config: &BenefitsConfig, price: u64) -> Result<(MemoryTree, NodeId)> {
    let mut tree = MemoryTree::new();
    tree.set_ready_state(ReadyState::Loading);
    let doc = tree.document_root();

    let root = append(&mut tree, doc, "div")?;
    mark(&mut tree, root, &config.root);
    tree.set_data(root, &config.price_key, &price.to_string());

    let summary = append(&mut tree, root, "p")?;
    for marker in [&config.slots.price, &config.slots.installments, &config.slots.points] {
        let slot = append(&mut tree, summary, "span")?;
        mark(&mut tree, slot, marker);
    }

    let table = append(&mut tree, root, "table")?;
    let body = append(&mut tree, table, "tbody")?;
    mark(&mut tree, body, &config.slots.table_body);

    Ok((tree, root))
}

fn append(tree: &mut MemoryTree, parent: NodeId, tag: &str) -> Result<NodeId> {
    tree.append_element(parent, tag)
        .with_context(|| format!("cannot append <{tag}> to {parent}"))
}

fn mark(tree: &mut MemoryTree, node: NodeId, marker: &Marker) {
    match marker {
        Marker::Class(class) => tree.add_class(node, class),
        Marker::Attribute(name) => tree.set_attribute(node, name, ""),
    }
}
