use clap::CommandFactory;

// Include the CLI definition
include!("src/cli.rs");

fn main() -> std::io::Result<()> {
    println!("cargo:rerun-if-changed=src/cli.rs");

    let out_dir = PathBuf::from(std::env::var("OUT_DIR").map_err(std::io::Error::other)?);

    let cmd = Cli::command();
    let man = clap_mangen::Man::new(cmd);
    let mut buffer: Vec<u8> = Default::default();

    // Render the man page
    man.render(&mut buffer)?;

    std::fs::write(out_dir.join("taxtree.1"), buffer)?;

    Ok(())
}
