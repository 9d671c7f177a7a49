//! Migration: Stored functions used by the user repository.
//!
//! Lookups return `role_names` as comma-joined text. `create_user` always
//! grants the `user` role. `confirm_user_registration` consumes the pending
//! row and returns NULL when there is none.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

const USER_COLUMNS: &str = r#"
    SELECT u.user_id,
           u.email_address,
           u.password_hash,
           COALESCE(string_agg(r.role_name, ',' ORDER BY r.role_id), '') AS role_names,
           u.created_at
    FROM users u
    LEFT JOIN user_roles ur ON ur.user_id = u.user_id
    LEFT JOIN roles r ON r.role_id = ur.role_id
"#;

const USER_RETURN_TYPE: &str = "TABLE (user_id BIGINT, email_address TEXT, password_hash TEXT, role_names TEXT, created_at TIMESTAMPTZ)";

fn lookup_function(signature: &str, filter: &str) -> String {
    format!(
        "CREATE OR REPLACE FUNCTION {signature}
        RETURNS {USER_RETURN_TYPE}
        LANGUAGE sql STABLE AS $$
            {USER_COLUMNS}
            {filter}
            GROUP BY u.user_id
            ORDER BY u.user_id
        $$"
    )
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        db.execute_unprepared(&lookup_function("get_all_users()", ""))
            .await?;
        db.execute_unprepared(&lookup_function(
            "get_user_by_user_id(p_user_id BIGINT)",
            "WHERE u.user_id = p_user_id",
        ))
        .await?;
        db.execute_unprepared(&lookup_function(
            "get_user_by_email_address(p_email_address TEXT)",
            "WHERE u.email_address = p_email_address",
        ))
        .await?;

        db.execute_unprepared(
            r#"
            CREATE OR REPLACE FUNCTION create_user(p_email_address TEXT, p_password_hash TEXT)
            RETURNS BIGINT
            LANGUAGE plpgsql AS $$
            DECLARE
                new_user_id BIGINT;
            BEGIN
                INSERT INTO users (email_address, password_hash)
                VALUES (p_email_address, p_password_hash)
                RETURNING users.user_id INTO new_user_id;

                INSERT INTO user_roles (user_id, role_id)
                SELECT new_user_id, roles.role_id FROM roles WHERE roles.role_name = 'user';

                RETURN new_user_id;
            END;
            $$
            "#,
        )
        .await?;

        db.execute_unprepared(
            r#"
            CREATE OR REPLACE FUNCTION create_user_registration(p_email_address TEXT, p_password_hash TEXT)
            RETURNS UUID
            LANGUAGE plpgsql AS $$
            DECLARE
                new_registration_id UUID;
            BEGIN
                INSERT INTO user_registrations (registration_id, email_address, password_hash)
                VALUES (gen_random_uuid(), p_email_address, p_password_hash)
                ON CONFLICT (email_address) DO UPDATE
                    SET registration_id = EXCLUDED.registration_id,
                        password_hash = EXCLUDED.password_hash,
                        created_at = now()
                RETURNING user_registrations.registration_id INTO new_registration_id;

                RETURN new_registration_id;
            END;
            $$
            "#,
        )
        .await?;

        db.execute_unprepared(
            r#"
            CREATE OR REPLACE FUNCTION confirm_user_registration(p_registration_id UUID)
            RETURNS BIGINT
            LANGUAGE plpgsql AS $$
            DECLARE
                pending user_registrations%ROWTYPE;
            BEGIN
                DELETE FROM user_registrations
                WHERE user_registrations.registration_id = p_registration_id
                RETURNING * INTO pending;

                IF NOT FOUND THEN
                    RETURN NULL;
                END IF;

                RETURN create_user(pending.email_address, pending.password_hash);
            END;
            $$
            "#,
        )
        .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .get_connection()
            .execute_unprepared(
                r#"
                DROP FUNCTION IF EXISTS confirm_user_registration(UUID);
                DROP FUNCTION IF EXISTS create_user_registration(TEXT, TEXT);
                DROP FUNCTION IF EXISTS create_user(TEXT, TEXT);
                DROP FUNCTION IF EXISTS get_user_by_email_address(TEXT);
                DROP FUNCTION IF EXISTS get_user_by_user_id(BIGINT);
                DROP FUNCTION IF EXISTS get_all_users();
                "#,
            )
            .await?;

        Ok(())
    }
}
