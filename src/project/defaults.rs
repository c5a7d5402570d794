//! Canonical bootstrap project.

pub const MARKUP: &str = r#"<main class="wrap">
  <h1>sandpen</h1>
  <p>Edit <code>index.html</code>, <code>style.css</code> and <code>script.js</code>, then type <strong>run</strong> or enable <em>auto-run</em>.</p>
  <button id="demoBtn">Click me</button>
  <p id="out"></p>
</main>"#;

pub const STYLE: &str = r#":root{
  --c:#111827; --bg:#f8fafc; --p:#2563eb; --card:#ffffff; --muted:#6b7280;
}
*{box-sizing:border-box}
body{margin:0; font:16px/1.5 system-ui, -apple-system, Segoe UI, Roboto, Arial, sans-serif; color:var(--c); background:var(--bg)}
.wrap{max-width:720px; margin:6vh auto; padding:24px; background:var(--card); border:1px solid #e5e7eb; border-radius:12px; box-shadow:0 10px 30px rgba(2,6,23,.06)}
h1{margin:0 0 10px; font-size:28px}
p{margin:0 0 12px; color:var(--muted)}
button{background:var(--p); color:#fff; border:0; padding:10px 14px; border-radius:10px; cursor:pointer}
button:hover{filter:brightness(1.05)}"#;

pub const SCRIPT: &str = r#"console.info("Editor ready.");
const btn = document.getElementById("demoBtn");
const out = document.getElementById("out");
btn?.addEventListener("click", () => {
  out.textContent = "Clicked at " + new Date().toLocaleTimeString();
  console.log({clicked:true, at: Date.now()});
});
"#;
