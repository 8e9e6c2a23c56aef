//! Embedded single-page shell: login/register, the check-in button with the
//! 7-day chart, and the profile view with the week/month/year trend tabs.
//! All state lives client-side; the page only talks to the /api routes.

pub const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="zh-CN">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>醒了么</title>
  <style>
    :root {
      --bg: #f9fafb;
      --ink: #1f2937;
      --muted: #9ca3af;
      --accent: #f59e0b;
      --accent-deep: #ea580c;
      --good: #22c55e;
      --card: #ffffff;
      --shadow: 0 18px 45px rgba(31, 41, 55, 0.08);
    }

    * { box-sizing: border-box; }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--ink);
      font-family: -apple-system, "PingFang SC", "Microsoft YaHei", sans-serif;
      display: grid;
      place-items: center;
      padding: 24px 16px;
    }

    .card {
      width: min(440px, 100%);
      background: var(--card);
      border-radius: 32px;
      box-shadow: var(--shadow);
      padding: 32px;
      display: grid;
      gap: 20px;
    }

    h1 {
      margin: 0;
      text-align: center;
      font-size: 2rem;
      color: var(--accent);
      letter-spacing: -1px;
    }

    .hello {
      text-align: center;
      color: var(--muted);
      font-size: 0.9rem;
      cursor: pointer;
    }

    .hello b { color: var(--ink); }

    .quote {
      min-height: 2.2em;
      text-align: center;
      color: var(--accent-deep);
      font-size: 0.8rem;
      font-style: italic;
    }

    input {
      width: 100%;
      padding: 13px 16px;
      border-radius: 16px;
      border: 1px solid #e5e7eb;
      font-size: 0.9rem;
      outline-color: var(--accent);
    }

    button {
      appearance: none;
      border: none;
      border-radius: 16px;
      padding: 14px 18px;
      font-size: 0.95rem;
      font-weight: 700;
      cursor: pointer;
      transition: transform 120ms ease;
    }

    button:active { transform: scale(0.96); }

    .btn-primary { background: linear-gradient(to top right, #fbbf24, var(--accent-deep)); color: white; }
    .btn-dark { background: #1f2937; color: white; }
    .btn-link { background: none; color: var(--accent-deep); padding: 4px; font-size: 0.8rem; }
    .btn-danger { background: none; color: #f87171; font-size: 0.75rem; letter-spacing: 0.2em; }

    .wake-wrap { display: flex; justify-content: center; padding: 8px 0; }

    .wake-btn {
      width: 176px;
      height: 176px;
      border-radius: 50%;
      font-size: 1.4rem;
      background: linear-gradient(to top right, #fbbf24, var(--accent-deep));
      color: white;
      box-shadow: 0 16px 40px rgba(245, 158, 11, 0.35);
    }

    .wake-btn.done {
      background: white;
      color: var(--good);
      border: 8px solid #f0fdf4;
      box-shadow: none;
      cursor: default;
    }

    .tabs { display: flex; gap: 4px; background: #f3f4f6; border-radius: 12px; padding: 4px; }

    .tab {
      flex: 1;
      background: none;
      padding: 7px 0;
      font-size: 0.8rem;
      color: var(--muted);
      border-radius: 9px;
    }

    .tab.active { background: white; color: var(--accent-deep); box-shadow: 0 2px 6px rgba(0,0,0,0.06); }

    .chart-title {
      display: flex;
      justify-content: space-between;
      align-items: center;
      font-size: 0.7rem;
      color: var(--muted);
      letter-spacing: 0.15em;
      text-transform: uppercase;
    }

    .chart-title .tz { color: var(--accent); background: #fffbeb; padding: 3px 8px; border-radius: 6px; letter-spacing: 0; }

    svg.chart { width: 100%; height: 200px; display: block; }

    .chart-line { fill: none; stroke: var(--accent); stroke-width: 3; }
    .chart-point { fill: var(--accent); stroke: white; stroke-width: 2; }
    .chart-grid { stroke: #f3f4f6; }
    .chart-label { fill: var(--muted); font-size: 10px; }

    .status { min-height: 1.2em; text-align: center; font-size: 0.85rem; color: var(--muted); }
    .status.error { color: #dc2626; }
    .status.ok { color: #16a34a; }

    .hidden { display: none; }

    form { display: grid; gap: 12px; margin: 0; }
    label { font-size: 0.8rem; color: #4b5563; }
  </style>
</head>
<body>
  <main class="card">
    <h1>醒了么</h1>

    <!-- 登录 / 注册 -->
    <section id="auth-view" class="hidden">
      <form id="login-form">
        <label>邮箱地址 <input id="login-email" type="email" required placeholder="your@email.com" /></label>
        <label>密码 <input id="login-password" type="password" required /></label>
        <button class="btn-primary" type="submit">登录</button>
        <button class="btn-link" type="button" id="show-register">没有账号？立即注册</button>
      </form>
      <form id="register-form" class="hidden">
        <label>用户昵称 <input id="reg-nickname" type="text" required placeholder="起个好听的名字" /></label>
        <label>邮箱地址 <input id="reg-email" type="email" required placeholder="name@example.com" /></label>
        <label>密码 <input id="reg-password" type="password" required minlength="6" placeholder="至少6位密码" /></label>
        <button class="btn-primary" type="submit">立即注册</button>
        <button class="btn-link" type="button" id="show-login">已有账号？去登录</button>
      </form>
    </section>

    <!-- 首页：打卡 -->
    <section id="home-view" class="hidden">
      <p class="hello" id="home-hello">你好，<b id="nickname"></b> 👋</p>
      <p class="quote" id="quote">准备好开启新的一天了吗？</p>
      <div class="wake-wrap">
        <button class="wake-btn" id="wake-btn" type="button">我醒了</button>
      </div>
      <div class="chart-title"><span>最近 7 天趋势</span><span class="tz">北京时间</span></div>
      <svg class="chart" id="home-chart" viewBox="0 0 400 200" role="img"></svg>
    </section>

    <!-- 个人中心 -->
    <section id="profile-view" class="hidden">
      <button class="btn-link" id="back-home" type="button">← 返回打卡</button>
      <form id="rename-form">
        <input id="new-nickname" type="text" placeholder="新昵称" />
        <button class="btn-primary" type="submit">修改昵称</button>
      </form>
      <form id="password-form">
        <input id="new-password" type="password" placeholder="新密码" />
        <button class="btn-dark" type="submit">重置密码</button>
      </form>
      <div class="tabs" id="range-tabs">
        <button class="tab active" type="button" data-range="week">周</button>
        <button class="tab" type="button" data-range="month">月</button>
        <button class="tab" type="button" data-range="year">年</button>
      </div>
      <svg class="chart" id="trend-chart" viewBox="0 0 400 200" role="img"></svg>
      <button class="btn-danger" id="logout" type="button">退出登录</button>
    </section>

    <div class="status" id="status"></div>
  </main>

  <script>
    const QUOTES = [
      '每一个清晨，都是重新开始的机会。☀️',
      '自律的顶端是自由，早起的你是最棒的！🚀',
      '世界还没醒，你已经开始了，这就是领先。🏁'
    ];

    const statusEl = document.getElementById('status');
    const views = {
      auth: document.getElementById('auth-view'),
      home: document.getElementById('home-view'),
      profile: document.getElementById('profile-view')
    };

    let range = 'week';
    let inFlight = false;

    const setStatus = (message, type) => {
      statusEl.textContent = message || '';
      statusEl.className = 'status' + (type ? ' ' + type : '');
    };

    const token = () => localStorage.getItem('wakeup_token');

    const show = (name) => {
      Object.entries(views).forEach(([key, el]) => el.classList.toggle('hidden', key !== name));
    };

    const api = async (path, options = {}) => {
      const headers = { 'content-type': 'application/json' };
      if (token()) headers.authorization = 'Bearer ' + token();
      const res = await fetch(path, { ...options, headers });
      if (res.status === 401) {
        localStorage.removeItem('wakeup_token');
        show('auth');
        throw new Error('请先登录');
      }
      const body = await res.json().catch(() => ({}));
      if (!res.ok) throw new Error(body.error || '请求失败，请重试');
      return body;
    };

    const formatHour = (value) => {
      const hours = Math.floor(value);
      const minutes = Math.round((value - hours) * 60);
      return String(hours).padStart(2, '0') + ':' + String(minutes).padStart(2, '0');
    };

    const renderChart = (el, points) => {
      const width = 400, height = 200, padX = 30, padY = 26, top = 14;
      const values = points.filter(p => p.has_data).map(p => p.time);
      let min = Math.min(4, ...values);
      let max = Math.max(12, ...values);
      const span = max - min;
      const xStep = points.length > 1 ? (width - padX * 2) / (points.length - 1) : 0;
      const x = (i) => padX + i * xStep;
      const y = (v) => height - padY - ((v - min) / span) * (height - top - padY);

      let grid = '';
      for (let i = 0; i <= 4; i += 1) {
        const value = min + (span * i) / 4;
        const yPos = y(value);
        grid += '<line class="chart-grid" x1="' + padX + '" y1="' + yPos + '" x2="' + (width - padX) + '" y2="' + yPos + '" />';
        grid += '<text class="chart-label" x="' + (padX - 6) + '" y="' + (yPos + 3) + '" text-anchor="end">' + formatHour(value) + '</text>';
      }

      // Gap days break the line into separate segments.
      let path = '';
      let pen = false;
      points.forEach((point, i) => {
        if (!point.has_data) { pen = false; return; }
        path += (pen ? ' L ' : ' M ') + x(i).toFixed(1) + ' ' + y(point.time).toFixed(1);
        pen = true;
      });

      const circles = points
        .map((point, i) => point.has_data
          ? '<circle class="chart-point" cx="' + x(i) + '" cy="' + y(point.time) + '" r="4" />'
          : '')
        .join('');

      const labelEvery = Math.ceil(points.length / 8);
      const labels = points
        .map((point, i) => i % labelEvery === 0
          ? '<text class="chart-label" x="' + x(i) + '" y="' + (height - padY + 16) + '" text-anchor="middle">' + point.day + '</text>'
          : '')
        .join('');

      el.innerHTML = grid + '<path class="chart-line" d="' + path.trim() + '" />' + circles + labels;
    };

    const setWoken = (woken) => {
      const btn = document.getElementById('wake-btn');
      btn.textContent = woken ? '今天已打卡' : '我醒了';
      btn.classList.toggle('done', woken);
      btn.disabled = woken;
      document.getElementById('quote').textContent = woken
        ? QUOTES[Math.floor(Math.random() * QUOTES.length)]
        : '准备好开启新的一天了吗？';
    };

    const loadHome = async () => {
      const trend = await api('/api/trend?range=week');
      renderChart(document.getElementById('home-chart'), trend.points);
      setWoken(trend.checked_in_today);
    };

    const loadTrend = async () => {
      const trend = await api('/api/trend?range=' + range);
      renderChart(document.getElementById('trend-chart'), trend.points);
    };

    const enterApp = async () => {
      const user = await api('/api/me');
      document.getElementById('nickname').textContent = user.display_name;
      document.getElementById('new-nickname').value = user.display_name;
      show('home');
      await loadHome();
    };

    // 单次在途请求保护：防止双击重复提交
    const guarded = (fn) => async (event) => {
      if (event) event.preventDefault();
      if (inFlight) return;
      inFlight = true;
      try {
        await fn();
      } catch (err) {
        setStatus(err.message, 'error');
      } finally {
        inFlight = false;
      }
    };

    document.getElementById('login-form').addEventListener('submit', guarded(async () => {
      const body = JSON.stringify({
        email: document.getElementById('login-email').value,
        password: document.getElementById('login-password').value
      });
      const data = await api('/api/login', { method: 'POST', body });
      localStorage.setItem('wakeup_token', data.token);
      setStatus('登录成功！', 'ok');
      await enterApp();
    }));

    document.getElementById('register-form').addEventListener('submit', guarded(async () => {
      const body = JSON.stringify({
        nickname: document.getElementById('reg-nickname').value,
        email: document.getElementById('reg-email').value,
        password: document.getElementById('reg-password').value
      });
      const data = await api('/api/register', { method: 'POST', body });
      localStorage.setItem('wakeup_token', data.token);
      setStatus('注册成功！', 'ok');
      await enterApp();
    }));

    document.getElementById('wake-btn').addEventListener('click', guarded(async () => {
      const result = await api('/api/checkin', { method: 'POST' });
      setStatus(result.status === 'created' ? '打卡成功！' : '今日已打卡', 'ok');
      await loadHome();
    }));

    document.getElementById('rename-form').addEventListener('submit', guarded(async () => {
      const name = document.getElementById('new-nickname').value;
      await api('/api/profile/name', { method: 'POST', body: JSON.stringify({ display_name: name }) });
      document.getElementById('nickname').textContent = name;
      setStatus('修改成功！', 'ok');
    }));

    document.getElementById('password-form').addEventListener('submit', guarded(async () => {
      const password = document.getElementById('new-password').value;
      await api('/api/profile/password', { method: 'POST', body: JSON.stringify({ password }) });
      document.getElementById('new-password').value = '';
      setStatus('密码修改成功', 'ok');
    }));

    document.getElementById('range-tabs').addEventListener('click', (event) => {
      const tab = event.target.closest('.tab');
      if (!tab) return;
      range = tab.dataset.range;
      document.querySelectorAll('.tab').forEach((el) => el.classList.toggle('active', el === tab));
      loadTrend().catch((err) => setStatus(err.message, 'error'));
    });

    document.getElementById('show-register').addEventListener('click', () => {
      document.getElementById('login-form').classList.add('hidden');
      document.getElementById('register-form').classList.remove('hidden');
    });

    document.getElementById('show-login').addEventListener('click', () => {
      document.getElementById('register-form').classList.add('hidden');
      document.getElementById('login-form').classList.remove('hidden');
    });

    document.getElementById('home-hello').addEventListener('click', () => {
      show('profile');
      loadTrend().catch((err) => setStatus(err.message, 'error'));
    });

    document.getElementById('back-home').addEventListener('click', () => {
      show('home');
      loadHome().catch((err) => setStatus(err.message, 'error'));
    });

    document.getElementById('logout').addEventListener('click', () => {
      localStorage.removeItem('wakeup_token');
      setStatus('');
      show('auth');
    });

    if (token()) {
      enterApp().catch(() => show('auth'));
    } else {
      show('auth');
    }
  </script>
</body>
</html>
"#;
