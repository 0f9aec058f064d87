//! Dashboard and privacy policy pages
//!
//! Static markup and a small script: pick a CSV, POST it to `/api/report`,
//! render the three summary values or the error message.

use axum::{
    response::{Html, IntoResponse},
    routing::get,
    Router,
};

use crate::AppState;

/// Build UI routes
pub fn ui_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root_page))
        .route("/privacy-policy", get(privacy_policy_page))
}

/// GET /
async fn root_page() -> impl IntoResponse {
    Html(ROOT_PAGE)
}

/// GET /privacy-policy
async fn privacy_policy_page() -> impl IntoResponse {
    Html(PRIVACY_POLICY_PAGE)
}

const ROOT_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Sentiment Analysis</title>
    <style>
        body {
            font-family: system-ui, -apple-system, sans-serif;
            background-color: #1a1a1a;
            color: #e0e0e0;
            display: flex;
            justify-content: center;
            align-items: center;
            min-height: 100vh;
            margin: 0;
        }
        .card {
            background-color: #2a2a2a;
            border: 1px solid #3a3a3a;
            border-radius: 8px;
            padding: 40px;
            width: 100%;
            max-width: 600px;
        }
        h1, h2 { text-align: center; color: #4a9eff; }
        .picker { display: flex; gap: 10px; }
        .picker input { flex: 1; }
        button {
            background-color: #4a9eff;
            color: #fff;
            border: none;
            border-radius: 4px;
            padding: 8px 16px;
            cursor: pointer;
        }
        button:disabled { background-color: #555; cursor: default; }
        .alert {
            margin-top: 24px;
            padding: 12px;
            border-radius: 4px;
            background-color: #5a1e1e;
            color: #ffb3b3;
        }
        ul { list-style: none; padding: 0; }
        li {
            display: flex;
            justify-content: space-between;
            padding: 12px 0;
            border-bottom: 1px solid #3a3a3a;
        }
        .badge { padding: 2px 10px; border-radius: 10px; font-weight: 600; }
        .info { background-color: #1e4a6e; }
        .danger { background-color: #6e1e1e; }
        .success { background-color: #1e6e3a; }
        [hidden] { display: none !important; }
        .footer {
            margin-top: 32px;
            padding-top: 16px;
            border-top: 1px solid #3a3a3a;
            text-align: center;
        }
        .footer a { color: #999; }
    </style>
</head>
<body>
    <div class="card">
        <h1>Sentiment Analysis</h1>
        <div class="picker">
            <input type="file" id="file" accept=".csv">
            <button type="button" id="analyze" disabled>Analyze</button>
        </div>

        <div class="alert" id="error" hidden></div>

        <div id="dashboard" hidden>
            <h2>Consolidated Results</h2>
            <ul>
                <li>Most Frequent Sentiment: <span class="badge info" id="most-frequent"></span></li>
                <li>Worst Sentiment Identified: <span class="badge danger" id="worst-feeling"></span></li>
                <li>Satisfaction Index: <span class="badge success" id="satisfaction"></span></li>
            </ul>
        </div>

        <div class="footer">
            <a href="/privacy-policy">Privacy Policy</a>
        </div>
    </div>

    <script>
        const fileInput = document.getElementById('file');
        const button = document.getElementById('analyze');
        const errorBox = document.getElementById('error');
        const dashboard = document.getElementById('dashboard');

        function reset() {
            errorBox.hidden = true;
            dashboard.hidden = true;
        }

        function showError(message) {
            errorBox.textContent = message;
            errorBox.hidden = false;
        }

        fileInput.addEventListener('change', () => {
            reset();
            button.disabled = fileInput.files.length === 0;
        });

        button.addEventListener('click', async () => {
            const file = fileInput.files[0];
            if (!file) {
                showError('Please select a file.');
                return;
            }

            reset();
            button.disabled = true;
            button.textContent = 'Analyzing...';

            try {
                const response = await fetch('/api/report', {
                    method: 'POST',
                    headers: { 'Content-Type': 'text/csv' },
                    body: file,
                });
                const body = await response.json();
                if (!response.ok) {
                    throw new Error(body.error || 'Failed to communicate with the server.');
                }

                document.getElementById('most-frequent').textContent = body.mostFrequent;
                document.getElementById('worst-feeling').textContent =
                    `${body.worstFeeling.label} (${body.worstFeeling.score.toFixed(2)})`;
                document.getElementById('satisfaction').textContent =
                    `${body.satisfactionIndex.toFixed(2)}%`;
                dashboard.hidden = false;
            } catch (err) {
                showError(err.message);
            } finally {
                button.disabled = false;
                button.textContent = 'Analyze';
            }
        });
    </script>
</body>
</html>
"#;

const PRIVACY_POLICY_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Privacy Policy - Sentiment Analysis</title>
    <style>
        body {
            font-family: system-ui, -apple-system, sans-serif;
            background-color: #1a1a1a;
            color: #e0e0e0;
            margin: 0;
            padding: 40px 20px;
        }
        .card {
            background-color: #2a2a2a;
            border: 1px solid #3a3a3a;
            border-radius: 8px;
            padding: 40px;
            max-width: 800px;
            margin: 0 auto;
        }
        h1 { color: #4a9eff; }
        .lead { font-size: 1.2em; margin-top: 24px; }
        li { margin-bottom: 8px; }
        .button {
            display: inline-block;
            margin-top: 24px;
            background-color: #4a9eff;
            color: #fff;
            border-radius: 4px;
            padding: 8px 16px;
            text-decoration: none;
        }
    </style>
</head>
<body>
    <div class="card">
        <h1>Privacy Policy</h1>
        <p class="lead">We take your privacy seriously.</p>
        <p>This application was developed for demonstration and learning purposes.</p>
        <ul>
            <li><strong>We do not store your CSV files.</strong> The file is processed in real-time and discarded immediately after the analysis.</li>
            <li>The data from the 'message' column is sent to the Hugging Face API to perform the sentiment analysis.</li>
            <li>Hugging Face processes this data to provide the result and does not retain it for other purposes, according to its policy.</li>
            <li>No personal data, such as 'username' or the content of the messages, is saved on our servers.</li>
        </ul>
        <a href="/" class="button">Back to Home</a>
    </div>
</body>
</html>
"#;
