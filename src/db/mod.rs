use diesel::r2d2::{ConnectionManager, Pool, PoolError};
use diesel::{r2d2, PgConnection};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

mod errors;
pub mod schema;
mod sessions;
mod teachers;
mod users;

pub use errors::RepositoryError;
pub use sessions::SessionOperations;
pub use teachers::TeacherOperations;
pub use users::UserOperations;

pub type DbPool = Pool<ConnectionManager<PgConnection>>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

pub fn establish_connection_pool(database_url: &str, max_size: u32) -> Result<DbPool, PoolError> {
    let manager = ConnectionManager::<PgConnection>::new(database_url);

    Pool::builder().max_size(max_size).build(manager)
}

pub fn run_db_migrations(pool: DbPool) -> Result<(), RepositoryError> {
    let mut conn = DbConnection::new(&pool)?;
    let applied = conn
        .connection()
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| RepositoryError::MigrationError(e.to_string()))?;
    for version in applied {
        info!("applied migration {}", version);
    }
    Ok(())
}

// Connection Guard - Manages pool
pub struct DbConnection<'a> {
    conn: r2d2::PooledConnection<ConnectionManager<PgConnection>>,
    _lifetime: std::marker::PhantomData<&'a ()>,
}

impl DbConnection<'_> {
    pub fn new(pool: &DbPool) -> Result<Self, RepositoryError> {
        Ok(Self {
            conn: pool.get().map_err(RepositoryError::ConnectionPoolError)?,
            _lifetime: std::marker::PhantomData,
        })
    }

    pub fn connection(&mut self) -> &mut PgConnection {
        &mut self.conn
    }
}
