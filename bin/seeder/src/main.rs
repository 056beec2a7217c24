use agritrack_core::migrations::run_pending_migrations;
use agritrack_primitives::models::entities::enum_types::{
    CropQuality, TransactionStatus, UserRole,
};
use agritrack_primitives::models::entities::transaction::{NewTransaction, Transaction};
use agritrack_primitives::models::entities::transaction_details::{
    BlockchainRecord, TransactionMetadata,
};
use agritrack_primitives::models::entities::user::{NewUser, User};
use agritrack_primitives::utility::{default_wallet_id, generate_transaction_code};
use chrono::{Duration, Utc};
use diesel::pg::PgConnection;
use diesel::prelude::*;
use dotenvy::dotenv;
use eyre::{Report, WrapErr};
use std::env;
use uuid::Uuid;

const SEED_PASSWORD: &str = "password123";

fn establish_connection() -> Result<PgConnection, Report> {
    let database_url = env::var("DATABASE_URL").wrap_err("DATABASE_URL must be set")?;
    PgConnection::establish(&database_url).wrap_err("Error connecting to the database")
}

fn main() -> Result<(), Report> {
    dotenv().ok();
    println!("Seeding database...");

    let mut conn = establish_connection()?;
    run_pending_migrations(&mut conn)?;

    // 1. clean tables
    clean_db(&mut conn)?;

    // 2. one account per role
    let farmer = seed_user(&mut conn, "ramesh_farms", UserRole::Farmer, "111111111111")?;
    let distributor = seed_user(
        &mut conn,
        "agro_logistics",
        UserRole::Distributor,
        "222222222222",
    )?;
    let retailer = seed_user(&mut conn, "fresh_mart", UserRole::Retailer, "333333333333")?;

    // 3. a linked production -> distribution -> retail chain
    let harvest = seed_transaction(&mut conn, &farmer, "DIST_001", 20.0, 0)?;
    let shipment = seed_transaction(&mut conn, &distributor, "RET_001", 26.0, 2)?;
    let sale = seed_transaction(&mut conn, &retailer, "CONSUMER", 32.0, 4)?;
    link(&mut conn, &harvest, &shipment)?;
    link(&mut conn, &shipment, &sale)?;

    println!(
        "Database seeded: 3 users (password '{SEED_PASSWORD}'), chain {} -> {} -> {}",
        harvest.transaction_id, shipment.transaction_id, sale.transaction_id
    );
    Ok(())
}

fn clean_db(conn: &mut PgConnection) -> Result<(), Report> {
    println!("Cleaning database...");
    diesel::sql_query("TRUNCATE users, transactions CASCADE")
        .execute(conn)
        .wrap_err("Error truncating tables")?;
    Ok(())
}

fn seed_user(
    conn: &mut PgConnection,
    name: &str,
    role: UserRole,
    aadhar: &str,
) -> Result<User, Report> {
    use agritrack_primitives::schema::users;

    let hashed = bcrypt::hash(SEED_PASSWORD, bcrypt::DEFAULT_COST)?;
    let wallet = default_wallet_id(role, Utc::now());

    let user = diesel::insert_into(users::table)
        .values(NewUser {
            username: name,
            password_hash: &hashed,
            role,
            address: "Nashik, Maharashtra",
            national_id: aadhar,
            wallet_id: &wallet,
        })
        .returning(User::as_returning())
        .get_result(conn)
        .wrap_err_with(|| format!("Error seeding user {name}"))?;

    println!("Created {role} {name} (aadhar {aadhar})");
    Ok(user)
}

fn seed_transaction(
    conn: &mut PgConnection,
    creator: &User,
    target: &str,
    price: f64,
    days_after_harvest: i64,
) -> Result<Transaction, Report> {
    use agritrack_primitives::schema::transactions;

    let harvested = Utc::now() - Duration::days(7);
    let metadata = TransactionMetadata {
        harvest_date: Some(harvested),
        batch_number: Some(format!("BATCH-{}", &Uuid::new_v4().simple().to_string()[..6])),
        certifications: vec!["organic".into()],
        ..Default::default()
    };

    let txn = diesel::insert_into(transactions::table)
        .values(NewTransaction {
            transaction_id: generate_transaction_code(creator.role, Utc::now()),
            created_by: creator.id,
            creator_role: creator.role,
            crop_name: "Basmati Rice".into(),
            quantity: "500 kg".into(),
            quality: CropQuality::Premium,
            price,
            price_unit: "per kg".into(),
            target_entity_id: target.into(),
            target_entity_type: creator.role.target_entity_type(),
            target_entity_details: None,
            transaction_date: harvested + Duration::days(days_after_harvest),
            stage: creator.role.stage(),
            location: None,
            metadata: serde_json::to_value(metadata)?,
            blockchain: serde_json::to_value(BlockchainRecord::default())?,
            status: TransactionStatus::Confirmed,
            is_verified: false,
        })
        .returning(Transaction::as_returning())
        .get_result(conn)
        .wrap_err("Error seeding transaction")?;

    Ok(txn)
}

fn link(conn: &mut PgConnection, previous: &Transaction, next: &Transaction) -> Result<(), Report> {
    use agritrack_primitives::schema::transactions::dsl::*;

    conn.transaction::<_, diesel::result::Error, _>(|conn| {
        diesel::update(transactions.find(previous.id))
            .set(next_transaction.eq(Some(next.id)))
            .execute(conn)?;
        diesel::update(transactions.find(next.id))
            .set(previous_transaction.eq(Some(previous.id)))
            .execute(conn)?;
        Ok(())
    })
    .wrap_err("Error linking seeded transactions")
}
