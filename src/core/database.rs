pub mod sqlite_operations {
    use diesel::prelude::*;
    use diesel::r2d2::{ConnectionManager, Pool, PooledConnection};
    use diesel::sql_query;
    use once_cell::sync::Lazy;
    use std::env;

    pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

    static POOL: Lazy<Pool<ConnectionManager<SqliteConnection>>> = Lazy::new(|| {
        let url = env::var("DATABASE_URL").expect("No DATABASE_URL in .env");
        Pool::builder()
            .build(ConnectionManager::new(url))
            .expect("Error connecting to database!")
    });

    pub fn connection() -> DbConnection {
        POOL.get().expect("Error checking out database connection!")
    }

    const SCHEMA: [&str; 7] = [
        "CREATE TABLE IF NOT EXISTS players (
            id TEXT PRIMARY KEY NOT NULL,
            username TEXT NOT NULL UNIQUE,
            max_chips INTEGER NOT NULL,
            created_at TIMESTAMP NOT NULL
        )",
        "CREATE TABLE IF NOT EXISTS rounds (
            id TEXT PRIMARY KEY NOT NULL,
            player_id TEXT NOT NULL REFERENCES players (id),
            round_no INTEGER NOT NULL,
            bet INTEGER NOT NULL,
            result TEXT NOT NULL,
            delta INTEGER NOT NULL,
            chips_after INTEGER NOT NULL,
            created_at TIMESTAMP NOT NULL
        )",
        "CREATE INDEX IF NOT EXISTS idx_rounds_player_created
            ON rounds (player_id, created_at)",
        "CREATE INDEX IF NOT EXISTS idx_rounds_created ON rounds (created_at)",
        "CREATE TABLE IF NOT EXISTS admin_users (
            id TEXT PRIMARY KEY NOT NULL,
            username TEXT NOT NULL UNIQUE,
            password_hash TEXT NOT NULL
        )",
        "CREATE TABLE IF NOT EXISTS admin_sessions (
            id TEXT PRIMARY KEY NOT NULL,
            token TEXT NOT NULL UNIQUE,
            admin_id TEXT NOT NULL REFERENCES admin_users (id),
            expires_at TIMESTAMP NOT NULL
        )",
        "CREATE TABLE IF NOT EXISTS visitor_stats (
            id INTEGER PRIMARY KEY NOT NULL,
            total INTEGER NOT NULL
        )",
    ];

    pub fn ensure_schema(conn: &SqliteConnection) -> Result<(), diesel::result::Error> {
        for statement in SCHEMA.iter() {
            sql_query(*statement).execute(conn)?;
        }
        Ok(())
    }
}

pub mod player_operations {
    use diesel::result::Error;
    use diesel::{insert_into, prelude::*};

    use crate::models::player::Player;
    use crate::models::schema::players::dsl::*;

    pub fn get_player_by_username(
        conn: &SqliteConnection,
        name: &str,
    ) -> Result<Option<Player>, Error> {
        let mut resp = players.filter(username.eq(name)).load::<Player>(conn)?;
        Ok(resp.pop())
    }

    pub fn find_or_create_player(conn: &SqliteConnection, name: &str) -> Result<Player, Error> {
        if let Some(player) = get_player_by_username(conn, name)? {
            return Ok(player);
        }
        let player = Player::new(name.to_string());
        insert_into(players).values(&player).execute(conn)?;
        Ok(player)
    }

    pub fn raise_max_chips(
        conn: &SqliteConnection,
        player: &str,
        chips: i32,
    ) -> Result<(), Error> {
        diesel::update(players.filter(id.eq(player)))
            .set(max_chips.eq(chips))
            .execute(conn)?;
        Ok(())
    }

    /// Substring search on username (SQL LIKE), best balance first, max 100.
    pub fn search_players(
        conn: &SqliteConnection,
        search: Option<&str>,
    ) -> Result<Vec<Player>, Error> {
        match search.map(str::trim) {
            Some(term) if !term.is_empty() => players
                .filter(username.like(format!("%{}%", term)))
                .order(max_chips.desc())
                .limit(100)
                .load::<Player>(conn),
            _ => players
                .order(max_chips.desc())
                .limit(100)
                .load::<Player>(conn),
        }
    }

    pub fn top_players(conn: &SqliteConnection, count: i64) -> Result<Vec<Player>, Error> {
        players
            .order(max_chips.desc())
            .limit(count)
            .load::<Player>(conn)
    }
}

pub mod round_operations {
    use chrono::NaiveDateTime;
    use diesel::result::Error;
    use diesel::sql_types::Timestamp;
    use diesel::{insert_into, prelude::*, sql_query};

    use super::player_operations;
    use crate::models::leaderboard::PeriodStanding;
    use crate::models::round::{Round, RoundResult};
    use crate::models::schema::rounds::dsl::*;

    /// Records one settled round. Player find-or-create, round insert and
    /// the conditional max_chips raise run in a single transaction so a
    /// concurrent submission for the same username cannot duplicate the
    /// player row or lose the max update.
    pub fn record_round(
        conn: &SqliteConnection,
        username: &str,
        round_number: i32,
        bet_amount: i32,
        outcome: RoundResult,
        chip_delta: i32,
        chips: i32,
    ) -> Result<Round, Error> {
        conn.transaction::<Round, Error, _>(|| {
            let player = player_operations::find_or_create_player(conn, username)?;
            let round = Round::new(
                player.id.clone(),
                round_number,
                bet_amount,
                outcome,
                chip_delta,
                chips,
            );
            insert_into(rounds).values(&round).execute(conn)?;
            if chips > player.max_chips {
                player_operations::raise_max_chips(conn, &player.id, chips)?;
            }
            Ok(round)
        })
    }

    pub fn recent_rounds(
        conn: &SqliteConnection,
        player: &str,
        count: i64,
    ) -> Result<Vec<Round>, Error> {
        rounds
            .filter(player_id.eq(player))
            .order(created_at.desc())
            .limit(count)
            .load::<Round>(conn)
    }

    /// One page of a player's history, newest first, plus the total row
    /// count for page-count computation.
    pub fn rounds_page(
        conn: &SqliteConnection,
        player: &str,
        page: i64,
        count: i64,
    ) -> Result<(Vec<Round>, i64), Error> {
        let total = rounds
            .filter(player_id.eq(player))
            .count()
            .get_result::<i64>(conn)?;
        let page_rounds = rounds
            .filter(player_id.eq(player))
            .order(created_at.desc())
            .limit(count)
            .offset((page - 1) * count)
            .load::<Round>(conn)?;
        Ok((page_rounds, total))
    }

    /// Best chips_after per player over rounds created since the given
    /// instant, top 10. Raw SQL because the aggregation needs GROUP BY.
    pub fn period_standings(
        conn: &SqliteConnection,
        since: NaiveDateTime,
    ) -> Result<Vec<PeriodStanding>, Error> {
        sql_query(
            "SELECT p.id AS id, p.username AS username, p.max_chips AS max_chips, \
                    MAX(r.chips_after) AS period_max_chips \
             FROM rounds r \
             JOIN players p ON p.id = r.player_id \
             WHERE r.created_at >= ? \
             GROUP BY r.player_id \
             ORDER BY period_max_chips DESC \
             LIMIT 10",
        )
        .bind::<Timestamp, _>(since)
        .load::<PeriodStanding>(conn)
    }
}

pub mod admin_operations {
    use diesel::result::Error;
    use diesel::{insert_into, prelude::*};

    use crate::models::admin::AdminUser;
    use crate::models::schema::admin_users::dsl::*;

    pub fn count_admins(conn: &SqliteConnection) -> Result<i64, Error> {
        admin_users.count().get_result::<i64>(conn)
    }

    pub fn get_admin_by_username(
        conn: &SqliteConnection,
        name: &str,
    ) -> Result<Option<AdminUser>, Error> {
        let mut resp = admin_users
            .filter(username.eq(name))
            .load::<AdminUser>(conn)?;
        Ok(resp.pop())
    }

    pub fn insert_admin(conn: &SqliteConnection, admin: &AdminUser) -> Result<(), Error> {
        insert_into(admin_users).values(admin).execute(conn)?;
        Ok(())
    }
}

pub mod session_operations {
    use diesel::result::Error;
    use diesel::{insert_into, prelude::*};

    use crate::models::admin::AdminSession;
    use crate::models::schema::admin_sessions::dsl::*;

    pub fn insert_session(conn: &SqliteConnection, session: &AdminSession) -> Result<(), Error> {
        insert_into(admin_sessions).values(session).execute(conn)?;
        Ok(())
    }

    pub fn get_session_by_token(
        conn: &SqliteConnection,
        session_token: &str,
    ) -> Result<Option<AdminSession>, Error> {
        let mut resp = admin_sessions
            .filter(token.eq(session_token))
            .load::<AdminSession>(conn)?;
        Ok(resp.pop())
    }

    pub fn delete_session(conn: &SqliteConnection, session_id: &str) -> Result<(), Error> {
        diesel::delete(admin_sessions.filter(id.eq(session_id))).execute(conn)?;
        Ok(())
    }

    pub fn delete_sessions_by_token(
        conn: &SqliteConnection,
        session_token: &str,
    ) -> Result<(), Error> {
        diesel::delete(admin_sessions.filter(token.eq(session_token))).execute(conn)?;
        Ok(())
    }
}

pub mod visitor_operations {
    use diesel::result::Error;
    use diesel::{insert_into, prelude::*};

    use crate::models::schema::visitor_stats::dsl::*;
    use crate::models::visitor::VisitorStat;

    pub fn ensure_visitor_row(conn: &SqliteConnection) -> Result<(), Error> {
        let existing = visitor_stats
            .filter(id.eq(1))
            .load::<VisitorStat>(conn)?
            .pop();
        if existing.is_none() {
            insert_into(visitor_stats)
                .values(&VisitorStat::seed())
                .execute(conn)?;
        }
        Ok(())
    }

    pub fn peek_total(conn: &SqliteConnection) -> Result<i32, Error> {
        let stat = visitor_stats.filter(id.eq(1)).load::<VisitorStat>(conn)?.pop();
        Ok(stat.map(|s| s.total).unwrap_or(0))
    }

    /// Bump the counter with a single SQL increment; the read-back shares
    /// the transaction so the returned total is the post-increment value.
    pub fn hit_total(conn: &SqliteConnection) -> Result<i32, Error> {
        conn.transaction::<i32, Error, _>(|| {
            diesel::update(visitor_stats.filter(id.eq(1)))
                .set(total.eq(total + 1))
                .execute(conn)?;
            peek_total(conn)
        })
    }
}
