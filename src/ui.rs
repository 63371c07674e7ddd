use crate::models::{TrackerResponse, MAX_METERS_PER_WALK};

pub fn render_index(view: &TrackerResponse) -> String {
    INDEX_HTML
        .replace("{{DATE}}", &view.date)
        .replace("{{COUNT}}", &view.count.to_string())
        .replace("{{METERS}}", &view.meters_per_walk.to_string())
        .replace("{{MAX_METERS}}", &MAX_METERS_PER_WALK.to_string())
        .replace("{{TOTAL}}", &view.total_meters.to_string())
        .replace("{{TODAY}}", &view.today_meters.to_string())
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Walk Tracker</title>
  <style>
    :root {
      --bg-1: #eef6ee;
      --bg-2: #bfe3c1;
      --ink: #24302a;
      --accent: #4caf50;
      --accent-hover: #45a049;
      --danger: #d9534f;
      --card: rgba(255, 255, 255, 0.88);
      --shadow: 0 24px 60px rgba(36, 48, 42, 0.16);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #f6fbf4 70%);
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      display: grid;
      place-items: center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(720px, 100%);
      background: var(--card);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 28px;
    }

    h1 {
      margin: 0;
      text-align: center;
      font-size: clamp(2rem, 4vw, 2.6rem);
    }

    .slider {
      display: grid;
      gap: 8px;
    }

    .slider input {
      width: 100%;
    }

    .actions {
      display: flex;
      justify-content: center;
      align-items: center;
      gap: 20px;
      flex-wrap: wrap;
    }

    .actions form {
      margin: 0;
    }

    button {
      appearance: none;
      border: none;
      cursor: pointer;
      font-weight: 600;
      color: white;
      transition: background-color 200ms ease, transform 150ms ease;
    }

    button:active {
      transform: scale(0.97);
    }

    .btn-walk {
      width: 80px;
      height: 80px;
      border-radius: 40px;
      font-size: 36px;
      background: var(--accent);
    }

    .btn-walk:hover {
      background: var(--accent-hover);
    }

    .btn-reset {
      border-radius: 12px;
      padding: 16px 28px;
      font-size: 18px;
      background: var(--danger);
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(160px, 1fr));
      gap: 16px;
      text-align: center;
    }

    .stat {
      background: white;
      border-radius: 18px;
      padding: 18px;
      display: grid;
      gap: 8px;
    }

    .stat .label {
      font-size: 0.85rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #7d877f;
    }

    .stat .value {
      font-size: 1.7rem;
      font-weight: 600;
    }

    .chart-card {
      background: white;
      border-radius: 20px;
      padding: 16px;
    }

    #chart {
      width: 100%;
      height: 240px;
      display: block;
    }

    .chart-bar {
      fill: var(--accent);
    }

    .chart-label {
      fill: #6f7a72;
      font-size: 11px;
    }

    .status {
      min-height: 1.2em;
      text-align: center;
      color: #6f7a72;
    }

    .status[data-type="error"] {
      color: #c63b2b;
    }
  </style>
</head>
<body>
  <main class="app">
    <h1>Walk Tracker</h1>

    <section class="slider">
      <label for="meters">Meters per walk: <strong id="meters-value">{{METERS}}</strong></label>
      <input id="meters" type="range" min="0" max="{{MAX_METERS}}" step="1" value="{{METERS}}" />
    </section>

    <section class="actions">
      <form method="post" action="/walk/r" data-action="r">
        <input type="hidden" name="meters_per_walk" value="{{METERS}}" />
        <button class="btn-walk" type="submit">R</button>
      </form>
      <form method="post" action="/walk/o" data-action="o">
        <input type="hidden" name="meters_per_walk" value="{{METERS}}" />
        <button class="btn-walk" type="submit">Ø</button>
      </form>
      <form method="post" action="/reset" data-action="reset">
        <input type="hidden" name="meters_per_walk" value="{{METERS}}" />
        <button class="btn-reset" type="submit">Reset</button>
      </form>
    </section>

    <section class="panel">
      <div class="stat">
        <span class="label">Walk count</span>
        <span id="count" class="value">{{COUNT}}</span>
      </div>
      <div class="stat">
        <span class="label">Total meters</span>
        <span id="total" class="value">{{TOTAL}} m</span>
      </div>
      <div class="stat">
        <span class="label">Today ({{DATE}})</span>
        <span id="today" class="value">{{TODAY}} m</span>
      </div>
    </section>

    <section class="chart-card">
      <svg id="chart" viewBox="0 0 600 240" aria-label="Meters per day" role="img"></svg>
    </section>

    <div class="status" id="status"></div>
  </main>

  <script>
    const slider = document.getElementById('meters');
    const metersValue = document.getElementById('meters-value');
    const countEl = document.getElementById('count');
    const totalEl = document.getElementById('total');
    const todayEl = document.getElementById('today');
    const statusEl = document.getElementById('status');
    const chartEl = document.getElementById('chart');

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
    };

    const updateUI = (data) => {
      countEl.textContent = data.count;
      totalEl.textContent = `${data.total_meters} m`;
      todayEl.textContent = `${data.today_meters} m`;
      metersValue.textContent = data.meters_per_walk;
    };

    const renderBars = (points) => {
      if (!points.length) {
        chartEl.innerHTML = '<text class="chart-label" x="50%" y="50%" text-anchor="middle">No walks yet</text>';
        return;
      }

      const width = 600;
      const height = 240;
      const padding = 32;
      const max = Math.max(1, ...points.map((p) => p.meters));
      const slot = (width - padding * 2) / points.length;
      const barWidth = Math.max(4, slot * 0.7);
      const labelEvery = Math.ceil(points.length / 10);

      chartEl.innerHTML = points
        .map((point, index) => {
          const barHeight = ((height - padding * 2) * point.meters) / max;
          const x = padding + index * slot + (slot - barWidth) / 2;
          const y = height - padding - barHeight;
          const label = index % labelEvery === 0
            ? `<text class="chart-label" x="${x + barWidth / 2}" y="${height - padding + 16}" text-anchor="middle">${point.date.slice(5)}</text>`
            : '';
          return `<rect class="chart-bar" x="${x}" y="${y}" width="${barWidth}" height="${barHeight}"><title>${point.date}: ${point.meters} m</title></rect>${label}`;
        })
        .join('');
    };

    const loadSeries = async () => {
      const res = await fetch('/api/series');
      if (!res.ok) {
        throw new Error('Unable to load walk log');
      }
      renderBars((await res.json()).points);
    };

    const send = async (actions) => {
      const res = await fetch('/api/cycle', {
        method: 'POST',
        headers: { 'content-type': 'application/json' },
        body: JSON.stringify({ actions, meters_per_walk: Number(slider.value) })
      });
      if (!res.ok) {
        const msg = await res.text();
        throw new Error(msg || 'Request failed');
      }
      updateUI(await res.json());
      await loadSeries();
      setStatus('', '');
    };

    slider.addEventListener('input', () => {
      metersValue.textContent = slider.value;
      document.querySelectorAll('input[name="meters_per_walk"]').forEach((input) => {
        input.value = slider.value;
      });
    });

    slider.addEventListener('change', () => {
      send([]).catch((err) => setStatus(err.message, 'error'));
    });

    document.querySelectorAll('form[data-action]').forEach((form) => {
      form.addEventListener('submit', (event) => {
        event.preventDefault();
        send([form.dataset.action]).catch((err) => setStatus(err.message, 'error'));
      });
    });

    loadSeries().catch((err) => setStatus(err.message, 'error'));
  </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_shows_count_and_total() {
        let view = TrackerResponse {
            date: "2024-01-01".into(),
            count: 3,
            meters_per_walk: 25,
            total_meters: 75,
            today_meters: 50,
            clicks: 0,
        };
        let html = render_index(&view);
        assert!(html.contains(r#"<span id="count" class="value">3</span>"#));
        assert!(html.contains("75 m"));
        assert!(html.contains(r#"value="25""#));
        assert!(!html.contains("{{"));
    }
}
