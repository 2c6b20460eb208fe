use sea_orm_migration::prelude::*;
use std::env;

fn main() {
    // 未设置 DATABASE_URL 时默认使用 data/chem_inventory.db
    if env::var("DATABASE_URL").is_err() {
        let in_migration_dir = env::current_dir().is_ok_and(|dir| dir.ends_with("migration"));
        let db_path = if in_migration_dir {
            "../data/chem_inventory.db"
        } else {
            "data/chem_inventory.db"
        };
        // SAFETY: 运行时尚未创建，此时进程内只有主线程
        unsafe {
            env::set_var("DATABASE_URL", format!("sqlite://{db_path}?mode=rwc"));
        }
    }

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Failed to build tokio runtime: {e}");
            std::process::exit(1);
        }
    };
    runtime.block_on(cli::run_cli(migration::Migrator));
}
