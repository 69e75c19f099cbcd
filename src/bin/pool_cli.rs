#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    if let Err(err) = native::run() {
        eprintln!("pool_cli error: {err}");
        std::process::exit(1);
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use pool_geometry::geom::{MeshDiagnostics, SurfaceMesh};
    use pool_geometry::pool::{PoolConfig, PoolScene, ShapeKind, WaterlineMetadata, build_pool_scene};
    use std::fmt::Write as _;
    use std::fs::{self, File};
    use std::io::{BufWriter, Write};
    use std::path::{Path, PathBuf};

    const SNAPSHOT_QUANTIZE: f64 = 1e-6;
    const SNAPSHOT_DECIMALS: usize = 6;

    const USAGE: &str = r#"pool_cli (pool-geometry)

USAGE:
  pool_cli list
  pool_cli run <shape|all> [options]

SHAPES:
  rectangle
  oval
  circular
  jellybean

OPTIONS (run):
  --config <path>    JSON pool config; its `shape` is replaced by the requested shape
  --out-dir <dir>    Write <shape>.obj and/or <shape>.snap to this dir (required for `all`)
  --obj <path>       Write OBJ (single shape only)
  --snap <path>      Write snapshot (single shape only)
  --no-obj           Skip OBJ when using --out-dir
  --no-snap          Skip snapshot when using --out-dir
  --overwrite        Overwrite existing output files
  -h, --help         Show this help
"#;

    pub fn run() -> Result<(), String> {
        let args: Vec<String> = std::env::args().skip(1).collect();
        let mut args = Args::new(args);

        let Some(command) = args.next() else {
            print_usage();
            return Ok(());
        };

        match command.as_str() {
            "list" => {
                print_shapes();
                Ok(())
            }
            "run" => cmd_run(&mut args),
            "-h" | "--help" | "help" => {
                print_usage();
                Ok(())
            }
            other => Err(format!("unknown command `{other}`\n\n{USAGE}")),
        }
    }

    fn print_usage() {
        println!("{USAGE}");
    }

    fn print_shapes() {
        for kind in ShapeKind::ALL {
            println!("{kind}");
        }
    }

    fn cmd_run(args: &mut Args) -> Result<(), String> {
        let shape_name = args.next().ok_or("missing shape name")?;

        let mut config_path: Option<PathBuf> = None;
        let mut out_dir: Option<PathBuf> = None;
        let mut obj_path: Option<PathBuf> = None;
        let mut snap_path: Option<PathBuf> = None;
        let mut overwrite = false;
        let mut write_obj = true;
        let mut write_snap = true;

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => config_path = Some(PathBuf::from(args.value("--config")?)),
                "--out-dir" => out_dir = Some(PathBuf::from(args.value("--out-dir")?)),
                "--obj" => obj_path = Some(PathBuf::from(args.value("--obj")?)),
                "--snap" => snap_path = Some(PathBuf::from(args.value("--snap")?)),
                "--overwrite" => overwrite = true,
                "--no-obj" => write_obj = false,
                "--no-snap" => write_snap = false,
                "-h" | "--help" => {
                    print_usage();
                    return Ok(());
                }
                other => return Err(format!("unknown option `{other}`\n\n{USAGE}")),
            }
        }

        let base = match config_path.as_deref() {
            Some(path) => read_config(path)?,
            None => PoolConfig::default(),
        };

        if let Some(dir) = out_dir.as_ref() {
            if obj_path.is_some() || snap_path.is_some() {
                return Err("use either --out-dir or --obj/--snap (not both)".to_string());
            }
            if !write_obj && !write_snap {
                return Err("nothing to write (both --no-obj and --no-snap set)".to_string());
            }

            fs::create_dir_all(dir).map_err(|e| format!("create out dir: {e}"))?;

            if shape_name == "all" {
                for kind in ShapeKind::ALL {
                    run_one_shape_to_dir(&base, kind, dir, write_obj, write_snap, overwrite)?;
                }
                return Ok(());
            }

            let kind = parse_shape(&shape_name)?;
            return run_one_shape_to_dir(&base, kind, dir, write_obj, write_snap, overwrite);
        }

        if shape_name == "all" {
            return Err("`run all` requires --out-dir".to_string());
        }

        let kind = parse_shape(&shape_name)?;
        let scene = build(&base, kind)?;
        let snap = scene_snapshot(&scene);

        if let Some(path) = snap_path.as_deref() {
            write_text_file(path, &snap, overwrite)?;
            eprintln!("wrote {}", path.display());
        } else {
            print!("{snap}");
        }

        if let Some(path) = obj_path.as_deref() {
            write_obj_file(path, &scene, overwrite)?;
            eprintln!("wrote {}", path.display());
        }

        report(&scene);
        Ok(())
    }

    fn run_one_shape_to_dir(
        base: &PoolConfig,
        kind: ShapeKind,
        dir: &Path,
        write_obj: bool,
        write_snap: bool,
        overwrite: bool,
    ) -> Result<(), String> {
        let scene = build(base, kind)?;

        if write_snap {
            let path = dir.join(format!("{kind}.snap"));
            write_text_file(&path, &scene_snapshot(&scene), overwrite)?;
            eprintln!("wrote {}", path.display());
        }

        if write_obj {
            let path = dir.join(format!("{kind}.obj"));
            write_obj_file(&path, &scene, overwrite)?;
            eprintln!("wrote {}", path.display());
        }

        report(&scene);
        Ok(())
    }

    fn build(base: &PoolConfig, kind: ShapeKind) -> Result<PoolScene, String> {
        build_pool_scene(&base.clone().with_shape(kind)).map_err(|e| e.to_string())
    }

    fn report(scene: &PoolScene) {
        for (name, diag) in scene.diagnostics() {
            eprintln!("{}/{name}: {}", scene.config.shape, diag.summary());
        }
        for warning in &scene.warnings {
            eprintln!("{}: warning: {warning}", scene.config.shape);
        }
    }

    fn parse_shape(name: &str) -> Result<ShapeKind, String> {
        name.parse().map_err(|_| {
            let mut msg = format!("unknown shape `{name}`\n\navailable shapes:\n");
            for kind in ShapeKind::ALL {
                let _ = writeln!(msg, "  {kind}");
            }
            msg
        })
    }

    fn read_config(path: &Path) -> Result<PoolConfig, String> {
        let text = fs::read_to_string(path).map_err(|e| format!("read {}: {e}", path.display()))?;
        PoolConfig::from_json_str(&text).map_err(|e| format!("{}: {e}", path.display()))
    }

    fn write_text_file(path: &Path, text: &str, overwrite: bool) -> Result<(), String> {
        if path.exists() && !overwrite {
            return Err(format!(
                "refusing to overwrite existing file {} (use --overwrite)",
                path.display()
            ));
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| format!("create dir {}: {e}", parent.display()))?;
        }
        fs::write(path, normalize_snapshot_text(text)).map_err(|e| format!("write {}: {e}", path.display()))
    }

    /// One OBJ object per scene mesh; indices keep running across objects.
    fn write_obj_file(path: &Path, scene: &PoolScene, overwrite: bool) -> Result<(), String> {
        if path.exists() && !overwrite {
            return Err(format!(
                "refusing to overwrite existing file {} (use --overwrite)",
                path.display()
            ));
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| format!("create dir {}: {e}", parent.display()))?;
        }

        let file = File::create(path).map_err(|e| format!("create {}: {e}", path.display()))?;
        let mut w = BufWriter::new(file);
        let obj_err = |e: std::io::Error| format!("write obj: {e}");

        writeln!(w, "# pool-geometry pool_cli").map_err(obj_err)?;

        let mut offset = 1u32;
        for (name, mesh) in scene.meshes() {
            mesh.validate().map_err(|e| format!("{name}: mesh validation failed: {e}"))?;
            write_obj_object(&mut w, name, mesh, offset).map_err(obj_err)?;
            let count = u32::try_from(mesh.vertex_count()).map_err(|_| format!("{name}: too many vertices for OBJ"))?;
            offset += count;
        }

        w.flush().map_err(|e| format!("flush {}: {e}", path.display()))
    }

    fn write_obj_object(w: &mut impl Write, name: &str, mesh: &SurfaceMesh, offset: u32) -> std::io::Result<()> {
        writeln!(w, "o {name}")?;

        for p in &mesh.positions {
            writeln!(w, "v {} {} {}", p[0], p[1], p[2])?;
        }
        if let Some(uvs) = mesh.uvs.as_ref() {
            for uv in uvs {
                writeln!(w, "vt {} {}", uv[0], uv[1])?;
            }
        }
        if let Some(normals) = mesh.normals.as_ref() {
            for n in normals {
                writeln!(w, "vn {} {} {}", n[0], n[1], n[2])?;
            }
        }

        let has_uvs = mesh.uvs.is_some();
        let has_normals = mesh.normals.is_some();

        for tri in mesh.indices.chunks_exact(3) {
            let a = tri[0] + offset;
            let b = tri[1] + offset;
            let c = tri[2] + offset;

            match (has_uvs, has_normals) {
                (true, true) => writeln!(w, "f {a}/{a}/{a} {b}/{b}/{b} {c}/{c}/{c}"),
                (true, false) => writeln!(w, "f {a}/{a} {b}/{b} {c}/{c}"),
                (false, true) => writeln!(w, "f {a}//{a} {b}//{b} {c}//{c}"),
                (false, false) => writeln!(w, "f {a} {b} {c}"),
            }?;
        }
        Ok(())
    }

    fn normalize_snapshot_text(text: &str) -> String {
        let normalized = text.replace("\r\n", "\n");
        if normalized.ends_with('\n') {
            normalized
        } else {
            format!("{normalized}\n")
        }
    }

    fn quantize_f64(value: f64) -> f64 {
        if !value.is_finite() {
            return value;
        }
        let q = (value / SNAPSHOT_QUANTIZE).round() * SNAPSHOT_QUANTIZE;
        if q == 0.0 { 0.0 } else { q }
    }

    fn write_f64(out: &mut String, value: f64) {
        let value = quantize_f64(value);
        let _ = write!(out, "{value:.SNAPSHOT_DECIMALS$}");
    }

    fn write_values_line(out: &mut String, prefix: &str, values: &[f64]) {
        out.push_str(prefix);
        for &value in values {
            out.push(' ');
            write_f64(out, value);
        }
        out.push('\n');
    }

    fn write_waterline(out: &mut String, metadata: &WaterlineMetadata) {
        let _ = writeln!(out, "waterline.tiles_around {}", metadata.tiles_around);
        out.push_str("waterline.total_length ");
        write_f64(out, metadata.total_length);
        out.push('\n');
        let _ = writeln!(out, "waterline.perimeter {}", metadata.perimeter.len());
        for p in metadata.perimeter.to_arrays() {
            write_values_line(out, "pp", &p);
        }
    }

    fn write_mesh_diagnostics(out: &mut String, name: &str, diag: &MeshDiagnostics) {
        let _ = writeln!(out, "{name}.diag.vertex_count {}", diag.vertex_count);
        let _ = writeln!(out, "{name}.diag.triangle_count {}", diag.triangle_count);
        let _ = writeln!(
            out,
            "{name}.diag.degenerate_triangle_count {}",
            diag.degenerate_triangle_count
        );
        let _ = writeln!(out, "{name}.diag.open_edge_count {}", diag.open_edge_count);
        let _ = writeln!(
            out,
            "{name}.diag.non_manifold_edge_count {}",
            diag.non_manifold_edge_count
        );
        let _ = writeln!(out, "{name}.diag.warning_count {}", diag.warnings.len());
    }

    fn write_mesh(out: &mut String, name: &str, mesh: &SurfaceMesh) {
        let _ = writeln!(out, "{name}.positions {}", mesh.positions.len());
        for p in &mesh.positions {
            write_values_line(out, "p", p);
        }

        let _ = writeln!(out, "{name}.indices {}", mesh.indices.len());
        for tri in mesh.indices.chunks_exact(3) {
            let _ = writeln!(out, "i {} {} {}", tri[0], tri[1], tri[2]);
        }

        match mesh.uvs.as_ref() {
            Some(uvs) => {
                let _ = writeln!(out, "{name}.uvs {}", uvs.len());
                for uv in uvs {
                    write_values_line(out, "uv", uv);
                }
            }
            None => {
                let _ = writeln!(out, "{name}.uvs none");
            }
        }

        match mesh.normals.as_ref() {
            Some(normals) => {
                let _ = writeln!(out, "{name}.normals {}", normals.len());
                for n in normals {
                    write_values_line(out, "n", n);
                }
            }
            None => {
                let _ = writeln!(out, "{name}.normals none");
            }
        }

        match mesh.tangents.as_ref() {
            Some(tangents) => {
                let _ = writeln!(out, "{name}.tangents {}", tangents.len());
                for t in tangents {
                    write_values_line(out, "t", t);
                }
            }
            None => {
                let _ = writeln!(out, "{name}.tangents none");
            }
        }
    }

    fn scene_snapshot(scene: &PoolScene) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "# pool-geometry snapshot v1");
        let _ = writeln!(out, "shape {}", scene.config.shape);
        let _ = writeln!(out, "quantize {SNAPSHOT_QUANTIZE:.1e}");
        write_waterline(&mut out, &scene.waterline_metadata);
        for (name, mesh) in scene.meshes() {
            write_mesh_diagnostics(&mut out, name, &MeshDiagnostics::from_mesh(mesh));
            write_mesh(&mut out, name, mesh);
        }
        normalize_snapshot_text(&out)
    }

    struct Args {
        args: Vec<String>,
        pos: usize,
    }

    impl Args {
        fn new(args: Vec<String>) -> Self {
            Self { args, pos: 0 }
        }

        fn next(&mut self) -> Option<String> {
            let arg = self.args.get(self.pos)?.clone();
            self.pos += 1;
            Some(arg)
        }

        fn value(&mut self, flag: &str) -> Result<String, String> {
            self.next().ok_or_else(|| format!("missing value for {flag}"))
        }
    }
}
