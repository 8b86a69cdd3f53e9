//! Reactive controller: keeps every benefits root in sync with price changes.
//!
//! A root is *uninitialized* until [`BenefitsController::init`] renders it and
//! registers its listeners; from then on it is *active* for the controller's
//! lifetime. Notifications are handled one at a time, each to completion, so
//! the most recent price is always what ends up rendered.

use hb_core::{NodeId, PriceCents};
use hb_events::{Channel, Event, EventBus, ExternalEvent, Notification, PRICE_CHANNELS, Subscription, translate};
use hb_render::{PresentationTree, ReadyState, RenderPipeline};
use tracing::{debug, info};

use crate::config::BenefitsConfig;

/// One `(channel, root)` registration.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Listener {
    pub channel: Channel,
    pub root: NodeId,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum RootState {
    Uninitialized,
    Active,
}

#[derive(Debug)]
pub struct BenefitsController {
    config: BenefitsConfig,
    pipeline: RenderPipeline,
    listeners: Vec<Listener>,
    subscription: Option<Subscription<ExternalEvent>>,
    deferred_start: bool,
}

impl BenefitsController {
    pub fn new(config: BenefitsConfig) -> Self {
        let pipeline = config.pipeline();
        Self {
            config,
            pipeline,
            listeners: Vec::new(),
            subscription: None,
            deferred_start: false,
        }
    }

    /// Controller fed by `bus`; call [`BenefitsController::pump`] to process it.
    pub fn with_bus<B: EventBus<ExternalEvent>>(config: BenefitsConfig, bus: &B) -> Self {
        let mut controller = Self::new(config);
        controller.subscription = Some(bus.subscribe());
        controller
    }

    pub fn config(&self) -> &BenefitsConfig {
        &self.config
    }

    pub fn pipeline(&self) -> &RenderPipeline {
        &self.pipeline
    }

    pub fn listeners(&self) -> &[Listener] {
        &self.listeners
    }

    pub fn root_state(&self, root: NodeId) -> RootState {
        if self.listeners.iter().any(|l| l.root == root) {
            RootState::Active
        } else {
            RootState::Uninitialized
        }
    }

    /// `true` while an [`BenefitsController::auto_start`] waits for the document.
    pub fn is_start_deferred(&self) -> bool {
        self.deferred_start
    }

    /// Persist `price` on `root` and re-render its summary and table.
    ///
    /// No-op if `root` is not in the tree.
    pub fn update<T: PresentationTree>(&self, tree: &mut T, root: NodeId, price: PriceCents) {
        if !tree.contains(root) {
            debug!(%root, "update for a detached root; skipped");
            return;
        }

        tree.set_data(root, &self.config.price_key, &price.to_string());
        self.pipeline.render_summary(tree, root, price);
        let body = self.pipeline.table_body(tree, root);
        self.pipeline.render_table(tree, body, price);
    }

    /// Register `root` on every price channel.
    ///
    /// Not deduplicated: attaching twice means each notification renders twice.
    pub fn attach_variant_listeners(&mut self, root: NodeId) {
        self.listeners
            .extend(PRICE_CHANNELS.iter().map(|&channel| Listener { channel, root }));
    }

    /// Render `root` from its stored price, then start listening for changes.
    pub fn init<T: PresentationTree>(&mut self, tree: &mut T, root: NodeId) {
        if !tree.contains(root) {
            return;
        }

        let stored = tree.data(root, &self.config.price_key);
        let price = PriceCents::coerce(stored.as_deref());
        self.update(tree, root, price);
        self.attach_variant_listeners(root);
        info!(%root, %price, "benefits root initialized");
    }

    /// Initialize every not-yet-initialized root in `scope` (and `scope` itself).
    ///
    /// Returns how many roots were initialized by this call.
    pub fn start<T: PresentationTree>(&mut self, tree: &mut T, scope: NodeId) -> usize {
        let mut roots = Vec::new();
        if tree.matches(scope, &self.config.root) {
            roots.push(scope);
        }
        roots.extend(tree.find_all(scope, &self.config.root));

        let mut initialized = 0;
        for root in roots {
            if tree.data(root, &self.config.init_key).as_deref() == Some("true") {
                continue;
            }
            self.init(tree, root);
            tree.set_data(root, &self.config.init_key, "true");
            initialized += 1;
        }

        info!(%scope, initialized, "benefits start");
        initialized
    }

    /// Start the whole document now, or once it stops loading.
    pub fn auto_start<T: PresentationTree>(&mut self, tree: &mut T) {
        match tree.ready_state() {
            ReadyState::Loading => {
                debug!("document still loading; deferring start");
                self.deferred_start = true;
            }
            _ => {
                let doc = tree.document_root();
                self.start(tree, doc);
            }
        }
    }

    /// Handle a single external event synchronously.
    pub fn dispatch<T: PresentationTree>(&mut self, tree: &mut T, event: &ExternalEvent) {
        let Some((channel, notification)) = translate(event) else {
            return;
        };
        debug!(
            event_id = %event.event_id(),
            channel = channel.name(),
            kind = notification.event_type(),
            occurred_at = %notification.occurred_at(),
            "dispatching notification"
        );

        match notification {
            Notification::PriceChanged { price, .. } => {
                let roots: Vec<NodeId> = self
                    .listeners
                    .iter()
                    .filter(|l| l.channel == channel)
                    .map(|l| l.root)
                    .collect();
                for root in roots {
                    self.update(tree, root, price);
                }
            }
            Notification::DocumentReady { .. } => {
                if std::mem::take(&mut self.deferred_start) {
                    let doc = tree.document_root();
                    self.start(tree, doc);
                }
            }
            Notification::ScopeLoaded { scope, .. } => {
                let scope = scope.unwrap_or_else(|| tree.document_root());
                self.start(tree, scope);
            }
        }
    }

    /// Drain the bus subscription, dispatching events in publication order.
    ///
    /// Returns the number of events taken off the bus.
    pub fn pump<T: PresentationTree>(&mut self, tree: &mut T) -> usize {
        let events: Vec<ExternalEvent> = match &self.subscription {
            Some(subscription) => subscription.drain().collect(),
            None => return 0,
        };

        for event in &events {
            self.dispatch(tree, event);
        }
        events.len()
    }
}

impl Default for BenefitsController {
    fn default() -> Self {
        Self::new(BenefitsConfig::default())
    }
}
