use axum::Router;

pub fn fixture(name: &str) -> String {
    std::fs::read_to_string(format!("tests/fixtures/{}", name)).unwrap()
}

/// A league page with `n` well-formed rows named "Team i(Manager i)".
pub fn league_page(n: usize) -> String {
    let rows: String = (1..=n)
        .map(|i| {
            format!(
                r#"<details class="row" data-played_rem="{rem}" data-gw="{gw}" data-total="{total}">
                     <summary>
                       <div class="team-name">Team {i}</div>
                       <div class="manager">Manager {i}</div>
                       <span class="kpi">OR {or}</span>
                       <div class="captain">Captain {i}</div>
                     </summary>
                   </details>"#,
                rem = i % 4,
                gw = 40 + i,
                total = 2000 - i,
                or = i * 1000,
            )
        })
        .collect();
    format!("<html><body><section>{}</section></body></html>", rows)
}

/// Serve `app` on an ephemeral local port and return its base URL.
pub async fn spawn_upstream(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}
