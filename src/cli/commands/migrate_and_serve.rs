use anyhow::Result;
use tracing::{info, trace};

use super::initdb::run_migrations;
use super::serve::{build_state, run_server};
use crate::cli::{DatabaseArgs, ServerArgs};

pub async fn migrate_and_serve(database: &DatabaseArgs, server: &ServerArgs) -> Result<()> {
    trace!("Entering migrate_and_serve function");
    info!("Applying database migrations and starting server");

    let state = build_state(database, server).await?;
    run_migrations(&state.db).await?;

    run_server(state, &server.bind_address).await
}
