//! Stylesheet
//!
//! Dark palette on `:root`; the `.light` wrapper class swaps the variables.

pub const STYLESHEET: &str = r#"
:root {
  --bg: #0b0c10;
  --panel: #111218;
  --panel-2: #171825;
  --text: #e6e6e6;
  --muted: #a3a3a3;
  --brand: #7c3aed;
  --brand-2: #22c55e;
  --ring: rgba(124, 58, 237, 0.5);
  --card-radius: 18px;
  --shadow: 0 6px 28px rgba(0,0,0,.35);
}

.light {
  --bg: #fafafa;
  --panel: #ffffff;
  --panel-2: #f4f4f5;
  --text: #0f172a;
  --muted: #334155;
  --brand: #7c3aed;
  --brand-2: #16a34a;
  --ring: rgba(124, 58, 237, .35);
  --card-radius: 18px;
  --shadow: 0 10px 28px rgba(2,6,23,.08);
}

html, body { margin: 0; padding: 0; }

* { box-sizing: border-box; font-family: ui-sans-serif, system-ui, -apple-system, Segoe UI, Roboto, Inter, Helvetica, Arial, Noto Sans, "Apple Color Emoji", "Segoe UI Emoji"; }

.app { min-height: 100vh; background: var(--bg); color: var(--text); display: grid; grid-template-columns: 260px minmax(0, 1fr); }
.sidebar { background: var(--panel); border-right: 1px solid rgba(255,255,255,.05); padding: 18px; display: flex; flex-direction: column; gap: 14px; }
.sidebar img.banner { width: 100%; border-radius: 12px; }
.sidebar h3, .sidebar h4 { margin: 8px 0 4px 0; }
.nav { display: flex; flex-direction: column; gap: 4px; }
.nav a { color: var(--text); text-decoration: none; padding: 8px 12px; border-radius: 10px; }
.nav a:hover { background: var(--panel-2); }
.nav a.active { background: rgba(124,58,237,.18); font-weight: 700; }
.notification { border: 1px solid rgba(255,255,255,.08); border-radius: 12px; padding: 10px 12px; }
.main { padding: 0 28px 28px 28px; min-width: 0; }

.header {
  display:flex;align-items:center;justify-content:space-between;gap:1rem;
  padding: 14px 22px;position:sticky;top:0;z-index:999;
  background: linear-gradient(180deg, rgba(0,0,0,0.35), rgba(0,0,0,0)) , var(--bg);
  margin-bottom: 4px;border-bottom: 1px solid rgba(255,255,255,.05);
}
.header .actions { display: flex; gap: 10px; align-items: center; }
.header form { margin: 0; }
.brand { display:flex;align-items:center;gap:.75rem;color:var(--text); }
.brand .logo {width:36px;height:36px;border-radius:12px;background:linear-gradient(135deg,var(--brand),var(--brand-2));box-shadow: var(--shadow);}
.brand .title {font-weight:800;font-size:1.15rem;letter-spacing:.2px}

.btn {
  display:inline-block;text-decoration:none;
  border:1px solid transparent;border-radius:14px;padding:10px 14px;cursor:pointer;font-weight:600;
  background:var(--panel);
  color:var(--text);
  transition:.18s ease all;box-shadow: var(--shadow);
}
.btn:hover { transform: translateY(-1px); border-color: var(--ring); box-shadow:0 12px 30px rgba(124,58,237,.18); }
.btn-primary { background: linear-gradient(135deg, var(--brand), var(--brand-2)); color:white; }
.btn-block { display:block; width:100%; text-align:center; margin-bottom: 10px; }

.card { background:var(--panel); border:1px solid rgba(255,255,255,.06); border-radius: var(--card-radius); padding:18px; box-shadow: var(--shadow); }
.card h3 { margin:0 0 6px 0; }
.card .muted, .muted { color: var(--muted); font-size:.9rem; }

.metrics { display:grid;grid-template-columns:repeat(4, minmax(0,1fr)); gap:16px; }
.metric { background:var(--panel-2); border:1px solid rgba(255,255,255,.06); border-radius:16px; padding:16px; }
.metric .label { color:var(--muted); font-size:.85rem; }
.metric .value { font-size:1.6rem; font-weight:800; }

.columns { display: grid; gap: 16px; }
.columns-2 { grid-template-columns: repeat(2, minmax(0, 1fr)); }
.columns-3 { grid-template-columns: repeat(3, minmax(0, 1fr)); }
.columns-2-1 { grid-template-columns: 2fr 1fr; }

.tabs { display: flex; gap: 8px; border-bottom: 1px dashed rgba(255,255,255,.08); margin: 12px 0; }
.tabs a { padding: 8px 14px; color: var(--muted); text-decoration: none; }
.tabs a.active { color: var(--text); border-bottom: 2px solid var(--brand); }

table.data { border-collapse: collapse; width: 100%; font-size: .9rem; }
table.data th, table.data td { border-bottom: 1px solid rgba(255,255,255,.06); padding: 6px 10px; text-align: left; }
table.data td.null { color: var(--muted); font-style: italic; }
tbody tr:hover { background: rgba(124,58,237,.06) }
.table-wrap { overflow: auto; max-height: 420px; }

.pill { display:inline-flex; gap:.35rem; align-items:center; padding:6px 10px; border-radius:16px; background:rgba(124,58,237,.15); color:#fff; font-weight:700; font-size:.8rem }

.alert { border-radius: 12px; padding: 12px 16px; margin: 12px 0; }
.alert-success { background: rgba(34,197,94,.15); border: 1px solid rgba(34,197,94,.4); }
.alert-info { background: rgba(59,130,246,.15); border: 1px solid rgba(59,130,246,.4); }
.alert-warning { background: rgba(234,179,8,.15); border: 1px solid rgba(234,179,8,.4); }
.alert-error { background: rgba(239,68,68,.15); border: 1px solid rgba(239,68,68,.4); }

details { margin: 12px 0; }
details summary { cursor: pointer; font-weight: 600; }
pre.echo { background: var(--panel-2); padding: 14px; border-radius: 12px; overflow: auto; }
hr.divider { border: 0; border-top: 1px solid rgba(255,255,255,.08); margin: 10px 0; }

form.stacked label { display: block; margin: 10px 0 4px 0; font-weight: 600; }
form.stacked input[type=text], form.stacked input[type=email], form.stacked select, form.stacked textarea {
  width: 100%; padding: 10px; border-radius: 10px; border: 1px solid rgba(255,255,255,.12); background: var(--panel-2); color: var(--text);
}
input[type=range] { width: 100%; accent-color: var(--brand); }

.chart { width: 100%; height: auto; display: block; }
.chart text { fill: var(--muted); font-size: 11px; }
.chart .axis { stroke: var(--muted); stroke-width: 1; opacity: .5; }
.chart .grid { stroke: var(--muted); stroke-width: 1; opacity: .12; }
.legend { display: flex; gap: 14px; font-size: .85rem; color: var(--muted); }
.legend .swatch { display: inline-block; width: 10px; height: 10px; border-radius: 3px; margin-right: 6px; }

.gallery-grid { display: grid; grid-template-columns: repeat(3, minmax(0, 1fr)); gap: 16px; align-items: start; }
.gallery-grid .column { display: flex; flex-direction: column; gap: 16px; }
.gallery-grid img { width: 100%; border-radius: 12px; }

.footer { margin-top:40px; padding: 20px; opacity:.8; font-size:.9rem; text-align:center; color:var(--muted); }
"#;
