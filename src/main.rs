use propgraph::graph::{metadata, EdgePattern, Metadata, PropertyGraph, VertexPattern};
use propgraph::GraphConfig;
use tracing_subscriber::EnvFilter;

fn main() {
    // Initialize tracing (RUST_LOG=debug shows every mutation)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("propgraph v{}", propgraph::version());
    println!("==========================================");

    let config = match std::env::args().nth(1) {
        Some(path) => match GraphConfig::from_path(&path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Failed to load {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => GraphConfig::default(),
    };

    let mut graph = PropertyGraph::with_config(&config);
    build_demo(&mut graph);
    print_summary(&graph);

    // Removing a vertex takes its edges with it
    if let Some(bob) = graph
        .find_vertices(&VertexPattern::new().with_label("Person").with_property("name", "Bob"))
        .first()
        .copied()
    {
        match graph.remove_vertex(bob) {
            Ok(()) => println!("\n✓ Removed Bob and its edges"),
            Err(e) => println!("\n✗ {}", e),
        }
    }
    print_summary(&graph);
}

fn build_demo(graph: &mut PropertyGraph) {
    println!("\n=== Building graph ===");

    let alice = graph.create_vertex(["Person"], metadata([("name", "Alice"), ("city", "New York")]));
    let bob = graph.create_vertex(["Person", "Employee"], metadata([("name", "Bob"), ("city", "San Francisco")]));
    let charlie = graph.create_vertex(["Person"], metadata([("name", "Charlie"), ("city", "New York")]));
    let acme = graph.create_vertex(["Company"], metadata([("name", "Acme")]));
    println!("✓ Created 4 vertices");

    let edges = [
        (alice, bob, "knows", metadata([("since", 2020)])),
        (bob, charlie, "knows", metadata([("since", 2019)])),
        (alice, charlie, "follows", Metadata::new()),
        (bob, acme, "works_at", metadata([("role", "engineer")])),
    ];
    for (start, end, label, meta) in edges {
        match graph.create_edge(start, end, label, meta) {
            Ok(id) => println!("✓ {} -[{}]-> {} as {}", start, label, end, id),
            Err(e) => println!("✗ {}", e),
        }
    }
}

fn print_summary(graph: &PropertyGraph) {
    let stats = graph.statistics();
    println!("\nGraph Statistics:");
    println!("  Total vertices: {}", stats.vertex_count);
    println!("  Total edges: {}", stats.edge_count);
    for (label, count) in &stats.vertex_labels {
        println!("  :{} x{}", label, count);
    }
    for (label, count) in &stats.edge_labels {
        println!("  -[{}]- x{}", label, count);
    }

    let knows = graph.find_edges(&EdgePattern::new().with_label("knows"));
    println!("  knows edges: {:?}", knows);
}
