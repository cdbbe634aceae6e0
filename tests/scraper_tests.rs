//! Routing + extraction tests
//!
//! These go through the public API the way the server does: route the URL,
//! then hand the rendered page source to the chosen scraper.

use article_fetch::scrapers::{scraper_for, ArticleScraper};
use article_fetch::{Article, DomainRouter, ScraperKind};
use pretty_assertions::assert_eq;

const WEIBO_DESKTOP: &str = r#"<!DOCTYPE html>
<html><head><title>微博</title></head><body>
<div id="app">
  <article class="woo-panel-main Feed_wrap_3v9LH">
    <header class="woo-box-flex">
      <div class="woo-box-item-flex head_main_3DRDm">
        <a class="ALink_default_2ibt1 head_cut_2Zcft" href="/u/2803301701">
          <span class="head_name_24eEB" title="人民日报">人民日报</span>
        </a>
        <div class="woo-box-flex head-info_info_2AspQ">
          <a class="head-info_time_6sFQg" href="/2803301701/O9xyz" title="2026-10-16 08:00">
            10-16 08:00
          </a>
          <div class="head-info_cut_1tPQI">来自 微博网页版</div>
        </div>
      </div>
    </header>
    <div class="Feed_body_3R0rO">
      <div class="wbpro-feed-content">
        <div class="detail_wbtext_4CRf9">
          【#秋季出行提示#】气温下降，
          出行注意保暖。
        </div>
      </div>
      <div class="wbpro-feed-video">
        播放视频播放
        加载完毕
        分享这条博文
      </div>
    </div>
  </article>
</div>
</body></html>"#;

const WEIBO_MOBILE: &str = r#"<!DOCTYPE html>
<html><body>
<div class="lite-page-wrap">
  <div class="card m-panel card9">
    <header class="weibo-top m-box">
      <div class="m-box-col m-box-dir m-box-center">
        <a class="m-img-box"><img src="a.jpg"></a>
        <div class="m-text-box">
          <a><h3 class="m-text-cut">央视新闻</h3></a>
          <h4 class="m-text-cut"><span class="time">10-16</span><span class="from"> 来自 微博 weibo.com</span></h4>
        </div>
      </div>
    </header>
    <article class="weibo-main">
      <div class="weibo-text">今天的新闻
        到此结束</div>
    </article>
  </div>
</div>
</body></html>"#;

const WEIXIN: &str = r#"<!DOCTYPE html>
<html><body>
<div id="page-content" class="rich_media_area_primary">
  <div class="rich_media_area_primary_inner">
    <h1 class="rich_media_title " id="activity-name">
      一篇文章的标题
    </h1>
    <div id="meta_content" class="rich_media_meta_list">
      <span class="rich_media_meta rich_media_meta_nickname">某公众号</span>
    </div>
    <div class="rich_media_content js_underline_content" id="js_content">
      <section><p>第一段。</p><p>第二段。</p></section>
    </div>
    <script type="text/javascript">
      var msg_title = '一篇文章的标题'.html(false);
    </script>
    <style>.rich_media_content{visibility:hidden}</style>
  </div>
</div>
</body></html>"#;

fn extract(url: &str, html: &str) -> Article {
    let kind = DomainRouter::default().resolve_url(url);
    scraper_for(kind).parse(html).unwrap()
}

#[test]
fn test_weibo_desktop_post() {
    let article = extract("https://weibo.com/2803301701/O9xyz", WEIBO_DESKTOP);
    assert_eq!(article.title, "人民日报在10-16 08:00发布了一条微博");
    assert_eq!(article.content, "【#秋季出行提示#】气温下降， 出行注意保暖。");
}

#[test]
fn test_weibo_mobile_post() {
    let article = extract("https://m.weibo.cn/detail/5000000000000000", WEIBO_MOBILE);
    assert_eq!(article.title, "央视新闻在10-16发布了一条微博");
    assert_eq!(
        article.content,
        "央视新闻 10-16 来自 微博 weibo.com 今天的新闻 到此结束"
    );
}

#[test]
fn test_weixin_article() {
    let article = extract("https://mp.weixin.qq.com/s/AbCdEf", WEIXIN);
    assert_eq!(article.title, "一篇文章的标题");
    assert_eq!(article.content, "一篇文章的标题 某公众号 第一段。第二段。");
}

#[test]
fn test_unrouted_host_uses_article_scraper() {
    let kind = DomainRouter::default().resolve_url("https://blog.example.com/post/1");
    assert_eq!(kind, ScraperKind::Weixin);
    let article = scraper_for(kind).parse(WEIXIN).unwrap();
    assert_eq!(article.title, "一篇文章的标题");
}

#[test]
fn test_wrong_site_markup_is_an_error() {
    let err = scraper_for(ScraperKind::WeiboMobile)
        .parse(WEIXIN)
        .unwrap_err();
    assert!(err.to_string().contains("lite-page-wrap"));
}

#[test]
fn test_article_serializes_as_two_strings() {
    let article = extract("https://mp.weixin.qq.com/s/AbCdEf", WEIXIN);
    let value = serde_json::to_value(&article).unwrap();
    assert_eq!(value.as_object().unwrap().len(), 2);
    assert_eq!(value["title"], "一篇文章的标题");
}
