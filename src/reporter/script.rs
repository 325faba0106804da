//! Client-side script for the generated viewer
//!
//! All view state (sidebar width, drag/collapse state, failure filter) lives
//! inside one closure per page; nothing is exposed as a page global.

/// Reporter that emits the viewer script
pub struct ScriptReporter;

impl ScriptReporter {
    pub fn new() -> Self {
        Self
    }

    /// Full script content
    pub fn report(&self) -> String {
        VIEWER_JS.to_string()
    }
}

impl Default for ScriptReporter {
    fn default() -> Self {
        Self::new()
    }
}

const VIEWER_JS: &str = r#"// RHCert Viewer
(function () {
  'use strict';

  const MIN_WIDTH = 200;
  const MAX_WIDTH = 600;
  const HIGHLIGHT_MS = 3000;

  function createViewer(doc) {
    const state = {
      sidebarWidth: 320,
      dragging: false,
      collapsed: false,
      onlyFailed: false,
    };

    const sidebar = doc.getElementById('sidebar');
    const resizer = doc.getElementById('resizer');
    const toggleBtn = doc.getElementById('toggleBtn');

    function documentRoot() {
      return doc.querySelector('.main-content > *');
    }

    function updateMainContentMargin() {
      const root = documentRoot();
      if (root) {
        root.style.marginLeft = state.collapsed ? '10px' : (state.sidebarWidth + 10) + 'px';
      }
    }

    function updateToggleButtonPosition() {
      if (toggleBtn && !state.collapsed) {
        toggleBtn.style.left = state.sidebarWidth + 'px';
      }
    }

    function initResizer() {
      if (!resizer) return;
      resizer.addEventListener('mousedown', function (e) {
        if (state.collapsed) return;
        state.dragging = true;
        doc.body.classList.add('no-select');
        resizer.classList.add('dragging');
        e.preventDefault();
      });
      doc.addEventListener('mousemove', function (e) {
        if (!state.dragging || state.collapsed) return;
        state.sidebarWidth = Math.max(MIN_WIDTH, Math.min(MAX_WIDTH, e.clientX));
        sidebar.style.width = state.sidebarWidth + 'px';
        updateMainContentMargin();
        updateToggleButtonPosition();
      });
      doc.addEventListener('mouseup', function () {
        if (!state.dragging) return;
        state.dragging = false;
        doc.body.classList.remove('no-select');
        resizer.classList.remove('dragging');
      });
    }

    function toggleSidebar() {
      state.collapsed = !state.collapsed;
      sidebar.classList.toggle('collapsed', state.collapsed);
      toggleBtn.classList.toggle('collapsed', state.collapsed);
      toggleBtn.textContent = state.collapsed ? '▶' : '◀';
      if (!state.collapsed) {
        updateToggleButtonPosition();
      } else {
        toggleBtn.style.left = '';
      }
      updateMainContentMargin();
    }

    function toggleTest(header) {
      const list = doc.getElementById('nav_' + header.dataset.test);
      const toggle = header.querySelector('.test-toggle');
      const expanded = list.classList.toggle('expanded');
      toggle.textContent = expanded ? '▲' : '▼';
    }

    // nth exact attribute match, then first exact match, then prefix match on the first token
    // XML attribute values arrive with tabs and line breaks turned into spaces;
    // the HTML parser keeps them, so compare in the XML form.
    function commandText(el) {
      return (el.getAttribute('command') || '').replace(/\r\n|[\t\n\r]/g, ' ');
    }

    function findCommand(text, occurrence) {
      const commands = Array.from(doc.querySelectorAll('.main-content command'));
      const exact = commands.filter(function (c) { return commandText(c) === text; });
      if (exact.length > occurrence) return exact[occurrence];
      if (exact.length) return exact[0];
      const token = text.split(/\s+/)[0];
      if (!token) return null;
      return commands.find(function (c) {
        return commandText(c).startsWith(token);
      }) || null;
    }

    function jumpToCommand(item) {
      item.classList.add('clicked');
      setTimeout(function () { item.classList.remove('clicked'); }, 600);

      doc.querySelectorAll('.highlight').forEach(function (el) { el.classList.remove('highlight'); });

      const target = findCommand(item.dataset.command, parseInt(item.dataset.occurrence || '0', 10));
      if (!target) return;
      target.classList.add('highlight');
      const rect = target.getBoundingClientRect();
      window.scrollTo({
        top: window.pageYOffset + rect.top - window.innerHeight / 3,
        behavior: 'smooth',
      });
      setTimeout(function () { target.classList.remove('highlight'); }, HIGHLIGHT_MS);
    }

    function jumpToTop() {
      const root = documentRoot();
      if (root) root.scrollIntoView({ behavior: 'smooth' });
    }

    function filterTests(term) {
      const query = term.trim().toLowerCase();
      doc.querySelectorAll('.test-item').forEach(function (item) {
        const visible = query === '' || item.textContent.toLowerCase().includes(query);
        item.style.display = visible ? 'block' : 'none';
      });
    }

    function applyFailureFilter() {
      doc.querySelectorAll('.command-item').forEach(function (item) {
        const passed = item.dataset.status === 'PASS';
        item.style.display = state.onlyFailed && passed ? 'none' : 'flex';
      });
      doc.querySelectorAll('.test-item').forEach(function (test) {
        if (!state.onlyFailed) {
          test.style.display = 'block';
          return;
        }
        const anyVisible = Array.from(test.querySelectorAll('.command-item'))
          .some(function (ci) { return ci.style.display !== 'none'; });
        test.style.display = anyVisible ? 'block' : 'none';
      });
    }

    function toggleFailed(btn) {
      state.onlyFailed = !state.onlyFailed;
      btn.textContent = state.onlyFailed ? 'Show All' : 'Show Failures';
      applyFailureFilter();
    }

    doc.addEventListener('click', function (e) {
      const action = e.target.closest('[data-action]');
      if (!action) return;
      switch (action.dataset.action) {
        case 'toggle-sidebar': toggleSidebar(); break;
        case 'toggle-test': toggleTest(action); break;
        case 'jump-command': jumpToCommand(action); break;
        case 'jump-top': jumpToTop(); break;
        case 'toggle-failed': toggleFailed(action); break;
      }
    });

    const search = doc.querySelector('.nav-search');
    if (search) {
      search.addEventListener('input', function (e) { filterTests(e.target.value); });
    }

    initResizer();
    updateMainContentMargin();
  }

  document.addEventListener('DOMContentLoaded', function () {
    createViewer(document);
  });
})();
"#;
