use crate::models::player::Player;
use crate::models::round::Round;

pub fn total_pages(total: i64, limit: i64) -> i64 {
    if limit <= 0 {
        return 1;
    }
    ((total + limit - 1) / limit).max(1)
}

pub fn build_login_page(error: Option<&str>) -> String {
    let notice = match error {
        Some(message) => format!("<p class='error'>{}</p>", escape(message)),
        None => String::new(),
    };
    format!(
        "{}<h1>Admin Console</h1>{}\
        <form method='post' action='/admin/login'>\
        <label>Username <input name='username'></label>\
        <label>Password <input name='password' type='password'></label>\
        <button type='submit'>Login</button>\
        </form>{}",
        get_html_head(),
        notice,
        get_html_tail()
    )
}

pub fn build_console_page(
    search: &str,
    players: &[Player],
    rounds_section: Option<(&str, &[Round], i64, i64, i64)>,
) -> String {
    let rounds_html = match rounds_section {
        Some((username, rounds, total, page, limit)) => {
            generate_rounds_section(username, rounds, total, page, limit)
        }
        None => String::new(),
    };
    format!(
        "{}<h1>Admin Console</h1>\
        <form method='post' action='/admin/logout'><button type='submit'>Logout</button></form>\
        <form method='get' action='/admin'>\
        <input name='search' value='{}' placeholder='player search'>\
        <button type='submit'>Search</button>\
        </form>\
        {}{}{}",
        get_html_head(),
        escape(search),
        generate_players_table(players),
        rounds_html,
        get_html_tail()
    )
}

fn generate_players_table(players: &[Player]) -> String {
    let mut table = String::from("<tr><th>Username</th><th>Max Chips</th><th>Created</th></tr>");
    for player in players.iter() {
        let row = format!(
            "<tr><td><a href='/admin?search={}&username={}'>{}</a></td><td>{}</td><td>{}</td></tr>",
            escape(&player.username),
            escape(&player.username),
            escape(&player.username),
            player.max_chips,
            player.created_at.format("%Y-%m-%d %H:%M:%S")
        );
        table = format!("{}{}", table, row);
    }
    format!("<h2>Players</h2><table>{}</table>", table)
}

fn generate_rounds_section(
    username: &str,
    rounds: &[Round],
    total: i64,
    page: i64,
    limit: i64,
) -> String {
    let mut table = String::from(
        "<tr><th>Round</th><th>Bet</th><th>Result</th><th>Delta</th><th>Chips After</th><th>Played</th></tr>",
    );
    for round in rounds.iter() {
        let sign = if round.delta >= 0 { "+" } else { "" };
        let row = format!(
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}{}</td><td>{}</td><td>{}</td></tr>",
            round.round_no,
            round.bet,
            escape(&round.result),
            sign,
            round.delta,
            round.chips_after,
            round.created_at.format("%Y-%m-%d %H:%M:%S")
        );
        table = format!("{}{}", table, row);
    }
    format!(
        "<h2>Rounds ({}, {} total)</h2><table>{}</table>{}",
        escape(username),
        total,
        table,
        generate_pager(username, total, page, limit)
    )
}

fn generate_pager(username: &str, total: i64, page: i64, limit: i64) -> String {
    let pages = total_pages(total, limit);
    let prev = if page > 1 {
        format!(
            "<a href='/admin?username={}&page={}&limit={}'>prev</a>",
            escape(username),
            page - 1,
            limit
        )
    } else {
        "<span>prev</span>".to_string()
    };
    let next = if page < pages {
        format!(
            "<a href='/admin?username={}&page={}&limit={}'>next</a>",
            escape(username),
            page + 1,
            limit
        )
    } else {
        "<span>next</span>".to_string()
    };
    format!("<p class='pager'>{} page {}/{} {}</p>", prev, page, pages, next)
}

fn escape(raw: &str) -> String {
    raw.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('\'', "&#39;")
        .replace('"', "&quot;")
}

fn get_html_tail() -> String {
    "</body></html>".to_string()
}

fn get_html_head() -> String {
    "<!DOCTYPE html><html lang='en'><head><meta charset='UTF-8'>
    <meta name='viewport' content='width=device-width, initial-scale=1.0'><title>Blackjack Admin</title></head><body><style>
    table{width: 100%;text-align: center;}tr:nth-child(2n) {background: #f4f4f4}th {color: #5a62c9;}
    td,th {border: 1px solid rgb(190, 190, 190);}label{display:block;margin:4px 0;}
    .error{color: red;}.pager span{color: #999;}</style>".to_string()
}
