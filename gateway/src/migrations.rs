//! 汇总各模块建表脚本并在启动时执行

use erp_adapter_postgres::{Migration, MigrationManager, PgPool};
use erp_errors::{AppError, AppResult};
use tracing::{error, info};

/// 所有模块的迁移，按依赖顺序排列（版本号区间互不重叠）
pub fn all_migrations() -> Vec<Migration> {
    let mut migrations = iam_identity::migrations();
    migrations.extend(mdm_material::migrations());
    migrations.extend(sc_wm::migrations());
    migrations.extend(sc_im::migrations());
    migrations.extend(pm_po::migrations());
    migrations.extend(sd_so::migrations());
    migrations.extend(mf_eng::migrations());
    migrations.extend(mf_sf::migrations());
    migrations
}

pub async fn run_migrations(pool: PgPool) -> AppResult<()> {
    let result = MigrationManager::new(pool).migrate(&all_migrations()).await?;

    if let Some(failure) = result.errors.first() {
        error!(
            version = failure.version,
            name = %failure.name,
            error = %failure.error,
            "Migration failed"
        );
        return Err(AppError::internal(format!(
            "Migration {} ({}) failed: {}",
            failure.version, failure.name, failure.error
        )));
    }

    info!(
        applied = result.applied_count(),
        skipped = result.skipped.len(),
        "Database migrations complete"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use erp_adapter_postgres::plan;

    use super::*;

    #[test]
    fn test_versions_unique_and_grouped_by_module() {
        let migrations = all_migrations();
        let ordered = plan(&migrations).unwrap();
        assert_eq!(ordered.len(), migrations.len());

        // 声明顺序即执行顺序，外键引用的表总在前面
        let declared: Vec<i64> = migrations.iter().map(|m| m.version).collect();
        let planned: Vec<i64> = ordered.iter().map(|m| m.version).collect();
        assert_eq!(declared, planned);

        assert!(planned.iter().all(|v| (100..900).contains(v)));
        assert!(planned.contains(&700));
        assert!(planned.contains(&803));
    }
}
