use tracing_subscriber::EnvFilter;

use transit_graph::articulation::find_articulation_points;
use transit_graph::components::find_components;
use transit_graph::domain::TransportMode;
use transit_graph::network::{Graph, LineRecord, StopRecord};
use transit_graph::planner::{Planner, SearchConfig};

/// Walking threshold for the demonstration network, in metres.
const WALKING_DISTANCE_M: f64 = 200.0;

/// Latitude `m` metres north of the city datum.
fn north(m: f64) -> f64 {
    -41.29 + m / 111_200.0
}

fn sample_network() -> Graph {
    let stops = vec![
        StopRecord::new("5000", "Courtenay Place", 174.78, north(0.0)),
        StopRecord::new("5008", "Manners Street", 174.78, north(150.0)),
        StopRecord::new("5500", "Wellington Station", 174.779, north(1800.0)),
        StopRecord::new("5515", "Lambton Quay", 174.776, north(1200.0)),
        StopRecord::new("8001", "Petone Station", 174.869, north(9500.0)),
        StopRecord::new("8300", "Waterloo Station", 174.912, north(13000.0)),
    ];
    let lines = vec![
        LineRecord::new(
            "B_2_N",
            TransportMode::Bus,
            &[("5000", 0), ("5008", 120), ("5515", 420), ("5500", 660)],
        ),
        LineRecord::new(
            "B_2_S",
            TransportMode::Bus,
            &[("5500", 0), ("5515", 240), ("5008", 540), ("5000", 660)],
        ),
        LineRecord::new(
            "T_HVL_N",
            TransportMode::Train,
            &[("5500", 0), ("8001", 480), ("8300", 900)],
        ),
        LineRecord::new(
            "T_HVL_S",
            TransportMode::Train,
            &[("8300", 0), ("8001", 420), ("5500", 900)],
        ),
    ];
    Graph::build(stops, lines).expect("sample network is valid")
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut graph = sample_network();
    graph
        .recompute_walking_edges(WALKING_DISTANCE_M)
        .expect("non-negative threshold");

    println!(
        "Network: {} stops, {} transport edges, {} walking edges",
        graph.stop_count(),
        graph.transport_edge_count(),
        graph.walking_edge_count()
    );

    let components = find_components(&graph);
    println!("Strongly connected components: {}", components.count());

    let mut cut_stops: Vec<&str> = find_articulation_points(&graph)
        .into_iter()
        .map(|s| graph.stop(s).name())
        .collect();
    cut_stops.sort_unstable();
    println!("Articulation points: {}", cut_stops.join(", "));

    let config = SearchConfig::default();
    let planner = Planner::new(&graph, &config);
    match planner.find_shortest_path_between("5008", "8300") {
        Some(path) => {
            println!(
                "Manners Street -> Waterloo Station: {} edges, {}s total",
                path.len(),
                path.total_time_secs()
            );
            let legs: Vec<_> = path
                .edges()
                .iter()
                .map(|&e| {
                    let edge = graph.edge(e);
                    serde_json::json!({
                        "from": graph.stop(edge.from()).id(),
                        "to": graph.stop(edge.to()).id(),
                        "mode": edge.mode().to_string(),
                        "line": edge.line().map(|l| graph.line(l).id().to_string()),
                        "seconds": edge.travel_time_secs(),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&legs).expect("valid JSON"));
        }
        None => println!("Manners Street -> Waterloo Station: no path"),
    }
}
