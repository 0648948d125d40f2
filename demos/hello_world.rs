use shell_fs::{FileSystemManager, HostFS};

fn main() -> shell_fs::Result<()> {
    env_logger::init();

    let tmp = std::env::temp_dir().join("shell_fs_demo");
    // leftovers of an interrupted run would make `mkdir` fail
    if tmp.exists() {
        std::fs::remove_dir_all(&tmp)?;
    }
    std::fs::create_dir_all(&tmp)?;

    // the manager starts at `tmp`; tokens are resolved against it
    let mut fs = FileSystemManager::with_backend(HostFS::new(), &tmp)?;
    println!("pwd: {}", fs.pwd());

    // creates `<tmp>/docs/drafts`; a leading `./` is the usual sentinel
    fs.mkdir("./docs/drafts")?;
    fs.touch("./docs/drafts/first.txt")?;

    // a second touch does not refresh the file, it fails
    assert!(fs.touch("./docs/drafts/first.txt").is_err());

    // the destination parent `<tmp>/backup` is created on the fly
    fs.cp("./docs/drafts/first.txt", "./backup/first.txt")?;
    assert!(fs.file_exists("./backup/first.txt"));

    // `docs` is flattened one level: `docs/drafts` is listed, not `docs`
    for path in fs.ls("*")? {
        println!("  {}", path.display());
    }

    fs.cd("./docs")?;
    println!("pwd: {}", fs.pwd());
    fs.cd("..")?;

    fs.rmdir("./docs")?;
    fs.rmdir("./backup")?;
    std::fs::remove_dir(&tmp)?;

    Ok(())
}
