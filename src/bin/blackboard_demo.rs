//! Blackboard demo binary.
//!
//! Drives two trees through a few scripted evaluations using scoped
//! accessors and logs what each scope ends up holding.
//!
//! # Environment Variables
//!
//! - `BLACKBOARD_GLOBAL_CAPACITY`, `BLACKBOARD_TREE_CAPACITY`,
//!   `BLACKBOARD_NODE_CAPACITY` — initial table capacities
//! - `BLACKBOARD_LOG_SCOPES` — log tree/node scope creation (default: true)
//! - `BLACKBOARD_CONFIG` — optional `.yaml`/`.json` config file (overrides the above)
//! - `RUST_LOG` — tracing filter (default: "info,agent_blackboard=debug")
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin blackboard-demo
//! ```

use agent_blackboard::{
    Blackboard, BlackboardConfig, BlackboardGetter, BlackboardSetter, MemoryScope, NodeId,
    ScopeKind, TreeContext, TreeId,
};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,agent_blackboard=debug".into()),
        )
        .init();

    let config = match std::env::var("BLACKBOARD_CONFIG") {
        Ok(path) => BlackboardConfig::from_file(&path)?,
        Err(_) => BlackboardConfig::from_env(),
    };
    tracing::info!(?config, "Starting blackboard demo");

    let mut blackboard = Blackboard::with_config(config);

    // Accessors are built once and reused across evaluations.
    let alarm = BlackboardSetter::<bool>::new("alarm", ScopeKind::Global);
    let alarm_seen = BlackboardGetter::<bool>::new("alarm", ScopeKind::Global);
    let ticks = BlackboardGetter::<u32>::new("ticks", ScopeKind::Tree);
    let ticks_set = BlackboardSetter::<u32>::new("ticks", ScopeKind::Tree);
    let hp = BlackboardGetter::<i32>::new("hp", ScopeKind::Node);
    let hp_set = BlackboardSetter::<i32>::new("hp", ScopeKind::Node);

    let trees = [TreeId::new(), TreeId::new()];
    let nodes = [NodeId::new(), NodeId::new()];

    for (round, tree) in trees.iter().copied().enumerate() {
        let mut ctx = TreeContext::new(&mut blackboard, tree);
        for node in &nodes {
            let count = ticks.get(&mut ctx, node, 0)?;
            ticks_set.set(&mut ctx, node, count + 1);

            let health = hp.get(&mut ctx, node, 100)?;
            hp_set.set(&mut ctx, node, health - 10 * (round as i32 + 1));
        }
        if round == 0 {
            alarm.set(&mut ctx, &nodes[0], true);
        }
        tracing::info!(
            %tree,
            ticks = ticks.get(&mut ctx, &nodes[0], 0)?,
            alarm = alarm_seen.get(&mut ctx, &nodes[1], false)?,
            "Evaluated tree"
        );
    }

    for tree in trees {
        blackboard.open_node(tree, nodes[0]);
        for node in nodes {
            let health = blackboard.get_typed("hp", MemoryScope::Node(tree, node), 0i32)?;
            tracing::info!(
                %tree,
                %node,
                health,
                open = blackboard.is_node_open(tree, node),
                "Node memory"
            );
        }
    }

    tracing::info!(
        trees = blackboard.tree_count(),
        nodes = blackboard.node_count(trees[0]),
        "Demo complete"
    );
    Ok(())
}
