//! Headless viewer: load an object file, fly the camera around it, and
//! report what each frame would draw.
//!
//! ```text
//! cargo run --example headless_viewer -- -i model.obj -o out.obj
//! ```
//!
//! With no `-i` the scene starts empty (`--demo` seeds a built-in cube);
//! with no `-o` nothing is written on exit.

use anyhow::Context;
use filigree_engine::geometry::point::world_point;
use filigree_engine::geometry::wireframe::Wireframe;
use filigree_engine::prelude::*;

struct Args {
    input: Option<String>,
    output: Option<String>,
    demo: bool,
}

fn parse_args() -> anyhow::Result<Args> {
    let mut args = Args {
        input: None,
        output: None,
        demo: false,
    };
    let mut iter = std::env::args().skip(1);
    while let Some(flag) = iter.next() {
        match flag.as_str() {
            "-i" => args.input = Some(iter.next().context("-i needs a path")?),
            "-o" => args.output = Some(iter.next().context("-o needs a path")?),
            "--demo" => args.demo = true,
            other => anyhow::bail!("unknown argument '{other}' (expected -i/-o/--demo)"),
        }
    }
    Ok(args)
}

fn demo_cube() -> Wireframe {
    let mut cube = Wireframe::new(0, "cube");
    for &z in &[-25.0, 25.0] {
        cube.vertices.push(world_point(-25.0, -25.0, z));
        cube.vertices.push(world_point(25.0, -25.0, z));
        cube.vertices.push(world_point(25.0, 25.0, z));
        cube.vertices.push(world_point(-25.0, 25.0, z));
    }
    cube.edges = vec![
        (0, 1), (1, 2), (2, 3), (3, 0), // back face
        (4, 5), (5, 6), (6, 7), (7, 4), // front face
        (0, 4), (1, 5), (2, 6), (3, 7), // connecting edges
    ];
    cube
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = parse_args()?;

    let wireframes = match &args.input {
        Some(path) => {
            filigree_engine::obj::load_path(path).with_context(|| format!("loading '{path}'"))?
        }
        None if args.demo => vec![demo_cube()],
        None => Vec::new(),
    };
    let scene = Scene::load(wireframes);
    println!("scene: {} object(s)", scene.len());

    let mut window = Window::with_viewport(800.0, 600.0);
    let renderer = Renderer::new(RenderSettings {
        curve_steps: 32,
        ..RenderSettings::default()
    });

    // A small scripted flight: orbit in the xz plane, then dolly in.
    let mut canvas = RecordingCanvas::new();
    for frame in 0..12 {
        if frame < 8 {
            window.rotate(15.0, 0, 2);
        } else {
            window.move_forward();
            window.zoom_in();
        }

        canvas.clear();
        renderer.render_frame(&scene, &window, &mut canvas);
        println!(
            "frame {frame:>2}: {} lines, {} points, {} polygons",
            canvas.count_lines(),
            canvas.count_points(),
            canvas.count_polygons(),
        );
    }

    if let Some(path) = &args.output {
        filigree_engine::obj::save_path(path, scene.wireframes())
            .with_context(|| format!("saving '{path}'"))?;
        println!("saved {} object(s) to {path}", scene.len());
    }

    Ok(())
}
