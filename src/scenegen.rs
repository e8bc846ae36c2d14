//! Scene snapshot generator.
//!
//! Produces deterministic `.hier` files of configurable size and shape for
//! benchmarking and testing the outliner viewer.

use anyhow::Result;
use rhier::SceneWriter;
use std::env;

// Object archetypes - (base name, weight, may have children)
const ARCHETYPES: &[(&str, usize, bool)] = &[
    ("Group", 2, true),
    ("Prop", 5, true),
    ("Mesh", 4, false),
    ("Light", 2, false),
    ("Camera", 1, false),
    ("Collider", 3, false),
    ("Emitter", 2, true),
    ("Audio", 1, false),
    ("Decal", 2, false),
    ("Trigger", 2, true),
];

// Simple PRNG (Linear Congruential Generator)
struct SimpleRng {
    state: u64,
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        SimpleRng { state: seed }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        self.state
    }

    fn gen_range(&mut self, min: usize, max: usize) -> usize {
        let range = max - min;
        (self.next_u64() % range as u64) as usize + min
    }

    fn gen_f32_range(&mut self, min: f32, max: f32) -> f32 {
        let unit = (self.next_u64() % 10_000) as f32 / 10_000.0;
        min + unit * (max - min)
    }
}

struct Config {
    num_groups: usize,
    max_depth: usize,
    children_min: usize,
    children_max: usize,
    seed: u64,
    output_file: Option<String>,
    use_brotli: bool,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            num_groups: 1,
            max_depth: 4,
            children_min: 2,
            children_max: 5,
            seed: 1,
            output_file: None,
            use_brotli: false,
        }
    }
}

fn parse_args() -> Result<Config> {
    let args: Vec<String> = env::args().collect();
    let mut config = Config::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-num_groups" => {
                i += 1;
                if i >= args.len() {
                    anyhow::bail!("-num_groups requires an argument");
                }
                config.num_groups = args[i].parse()?;
            }
            "-depth" => {
                i += 1;
                if i >= args.len() {
                    anyhow::bail!("-depth requires an argument");
                }
                config.max_depth = args[i].parse()?;
            }
            "-children" => {
                i += 1;
                if i >= args.len() {
                    anyhow::bail!("-children requires at least one argument");
                }
                config.children_min = args[i].parse()?;
                // Check if there's a second number (range)
                if i + 1 < args.len() && !args[i + 1].starts_with('-') {
                    if let Ok(max) = args[i + 1].parse::<usize>() {
                        i += 1;
                        config.children_max = max;
                    } else {
                        config.children_max = config.children_min;
                    }
                } else {
                    config.children_max = config.children_min;
                }
            }
            "-seed" => {
                i += 1;
                if i >= args.len() {
                    anyhow::bail!("-seed requires an argument");
                }
                config.seed = args[i].parse()?;
            }
            "-out" => {
                i += 1;
                if i >= args.len() {
                    anyhow::bail!("-out requires a file path argument");
                }
                config.output_file = Some(args[i].clone());
            }
            "-brotli" => {
                config.use_brotli = true;
            }
            "-h" | "-help" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            _ => {
                eprintln!("Warning: Unknown argument: {}", args[i]);
            }
        }
        i += 1;
    }

    if config.children_max < config.children_min {
        anyhow::bail!("-children range is inverted");
    }

    Ok(config)
}

fn print_help() {
    println!("Scene Hierarchy Generator");
    println!("Usage: hier-scenegen [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("  -num_groups <N>        Number of top-level groups (default: 1)");
    println!("  -depth <N>             Maximum nesting depth (default: 4)");
    println!("  -children <N> [M]      Children per parent (default: 2 5)");
    println!("                         If two numbers provided, count is random in [N, M]");
    println!("  -seed <N>              PRNG seed (default: 1)");
    println!("  -out <FILE>            Output file path (default: scene.hier)");
    println!("  -brotli                Write compressed snapshot (output: *.hier.br)");
    println!("  -h, -help, --help      Show this help message");
}

fn main() -> Result<()> {
    let config = parse_args()?;

    let output_path = config.output_file.clone().unwrap_or_else(|| {
        if config.use_brotli {
            "scene.hier.br".to_string()
        } else {
            "scene.hier".to_string()
        }
    });
    let mut writer = SceneWriter::new(&output_path)?;

    let total = generate_scene(&mut writer, &config)?;

    println!("Scene written to: {} ({} objects)", output_path, total);

    Ok(())
}

fn pick_archetype(rng: &mut SimpleRng) -> (&'static str, bool) {
    let total_weight: usize = ARCHETYPES.iter().map(|&(_, w, _)| w).sum();
    let mut roll = rng.gen_range(0, total_weight);
    for &(name, weight, may_nest) in ARCHETYPES {
        if roll < weight {
            return (name, may_nest);
        }
        roll -= weight;
    }
    ("Prop", true)
}

fn generate_scene(writer: &mut SceneWriter, config: &Config) -> Result<usize> {
    let mut rng = SimpleRng::new(config.seed);
    let mut next_id: u64 = 1;
    let mut total = 0;

    writer.write_header(
        "1.0",
        serde_json::json!({
            "generator": "hier-scenegen",
            "seed": config.seed,
            "max_depth": config.max_depth,
        }),
    )?;

    for group_index in 0..config.num_groups.max(1) {
        let group = writer.write_group(&format!("Scene {}", group_index + 1))?;

        let num_roots = rng.gen_range(config.children_min, config.children_max + 1);
        for _ in 0..num_roots {
            total += generate_subtree(writer, config, &mut rng, &mut next_id, None, group, 0)?;
        }
    }

    writer.write_footer()?;
    Ok(total)
}

#[allow(clippy::too_many_arguments)]
fn generate_subtree(
    writer: &mut SceneWriter,
    config: &Config,
    rng: &mut SimpleRng,
    next_id: &mut u64,
    parent_id: Option<u64>,
    group: usize,
    depth: usize,
) -> Result<usize> {
    let id = *next_id;
    *next_id += 1;

    let (archetype, may_nest) = pick_archetype(rng);
    let name = format!("{}_{}", archetype, id);
    // Width tracks the label; one in twenty rows is double height.
    let width = 7.0 * name.len() as f32 + rng.gen_f32_range(0.0, 30.0);
    let height = if rng.gen_range(0, 20) == 0 { 40.0 } else { 20.0 };
    let active = rng.gen_range(0, 10) != 0;
    let ignore = rng.gen_range(0, 50) == 0;

    writer.write_node(id, parent_id, group, &name, active, width, height, ignore)?;
    let mut total = 1;

    if may_nest && depth < config.max_depth {
        let num_children = rng.gen_range(config.children_min, config.children_max + 1);
        for _ in 0..num_children {
            total +=
                generate_subtree(writer, config, rng, next_id, Some(id), group, depth + 1)?;
        }
    }

    Ok(total)
}
