//! Initialize a comparison docs site in a project.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

/// Run the init command.
pub async fn run(yes: bool) -> Result<()> {
    tracing::info!("Initializing tandem...");

    let docs_dir = Path::new("docs");

    // Check if docs already exists
    if docs_dir.exists() {
        if !yes {
            tracing::warn!("docs/ directory already exists. Use --yes to overwrite.");
            return Ok(());
        }
    } else {
        fs::create_dir_all(docs_dir).context("Failed to create docs directory")?;
    }

    // Create default config
    let config_path = Path::new("tandem.toml");
    if !config_path.exists() || yes {
        fs::write(config_path, DEFAULT_CONFIG).context("Failed to write tandem.toml")?;
        tracing::info!("Created tandem.toml");
    }

    // Create index page
    let index_path = docs_dir.join("index.mdx");
    if !index_path.exists() || yes {
        fs::write(&index_path, DEFAULT_INDEX).context("Failed to write index.mdx")?;
        tracing::info!("Created docs/index.mdx");
    }

    // Create getting-started page
    let getting_started_path = docs_dir.join("getting-started.mdx");
    if !getting_started_path.exists() || yes {
        fs::write(&getting_started_path, DEFAULT_GETTING_STARTED)
            .context("Failed to write getting-started.mdx")?;
        tracing::info!("Created docs/getting-started.mdx");
    }

    // Create comparisons directory
    let comparisons_dir = docs_dir.join("comparisons");
    if !comparisons_dir.exists() {
        fs::create_dir_all(&comparisons_dir).context("Failed to create comparisons directory")?;
    }

    // Create example comparison page
    let redirects_path = comparisons_dir.join("redirects.mdx");
    if !redirects_path.exists() || yes {
        fs::write(&redirects_path, DEFAULT_REDIRECTS_DOC)
            .context("Failed to write redirects.mdx")?;
        tracing::info!("Created docs/comparisons/redirects.mdx");
    }

    tracing::info!("Initialization complete!");
    tracing::info!("Run 'tandem dev' to start the development server.");

    Ok(())
}

const DEFAULT_CONFIG: &str = r#"# Tandem Configuration

[docs]
# Source directory for documentation
dir = "docs"

# Output directory for built site
output = "dist"

# Site title
title = "Remix for Next.js Developers"

# Base URL (for deployment)
base_url = "/"

[compare]
# Labels over the comparison columns
left_label = "Next.js"
right_label = "Remix"

[build]
# Enable minification
minify = true
"#;

const DEFAULT_INDEX: &str = r#"---
title: Welcome
order: 1
---

# Learn by Comparison

Snippets of code shown side by side, one framework against the other.

## Getting Started

Check out the [Getting Started](/getting-started/) guide to learn how pages
are written.

## Comparisons

Browse the [Comparisons](/comparisons/) section for side-by-side examples.
"#;

const DEFAULT_GETTING_STARTED: &str = r#"---
title: Getting Started
order: 2
---

# Getting Started

This guide shows how to write comparison pages.

## Installation

```bash
cargo install tandem
```

## Project Structure

```
your-project/
├── docs/                  # Documentation source
│   ├── index.mdx         # Home page
│   └── comparisons/      # Comparison pages
└── tandem.toml           # Configuration
```

## Writing Pages

Create `.mdx` files in the `docs/` directory. Each file needs frontmatter:

```mdx
---
title: Page Title
order: 1
---

# Your Content Here
```

## Side-by-Side Blocks

Tag a fenced code block with `left` and follow it with a `right` block to
render the pair as one comparison panel:

```tsx left filename="app/page.tsx"
export default function Page() {}
```

```tsx right filename="app/routes/_index.tsx"
export default function Index() {}
```

## Development

Start the dev server:

```bash
tandem dev
```

## Building

Build for production:

```bash
tandem build
```
"#;

const DEFAULT_REDIRECTS_DOC: &str = r#"---
title: Redirects
order: 1
---

# Redirects

Redirecting from a server handler.

## Basic Redirect

```tsx left filename="app/page.tsx"
import { redirect } from 'next/navigation';

export default async function Page() {
  redirect('/login');
}
```

```tsx right filename="app/routes/_index.tsx"
import { redirect } from '@remix-run/node';

export async function loader() {
  return redirect('/login');
}
```

## Redirect with Status

```tsx left filename="next.config.js"
module.exports = {
  async redirects() {
    return [
      { source: '/old', destination: '/new', permanent: true },
    ];
  },
};
```

```tsx right filename="app/routes/old.tsx"
import { redirect } from '@remix-run/node';

export async function loader() {
  return redirect('/new', { status: 308 });
}
```
"#;
