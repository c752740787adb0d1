//! Built-in catalog of log-format patterns.
//!
//! Seeded into `grok.json` on first run. Priorities live in the 1-220 band;
//! the generic catch-alls carry the highest numbers so specific formats are
//! tried first under the tokenizer's "higher priority first" rule.

use logsonic_types::{GrokPatternDefinition, PatternType};

use PatternType::{Blockchain, Cloud, Infrastructure, Security, Standard, Streaming};

fn def(
    name: &str,
    pattern: &str,
    priority: i32,
    description: &str,
    pattern_type: PatternType,
) -> GrokPatternDefinition {
    GrokPatternDefinition::new(name, pattern)
        .with_priority(priority)
        .with_description(description)
        .with_type(pattern_type)
}

/// Returns the default pattern catalog.
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn default_patterns() -> Vec<GrokPatternDefinition> {
    vec![
        // Standard system logs
        def(
            "Syslog",
            r#"%{SYSLOGTIMESTAMP:timestamp} %{HOSTNAME:hostname} %{PROG:program}(?:\(%{WORD:facility}\))?(?:\[%{POSINT:pid}\])?: %{GREEDYDATA:message}\r?$"#,
            1,
            "Standard Syslog Format",
            Standard,
        ),
        // Web server logs
        def(
            "Apache Common Log",
            r#"%{IPORHOST:clientip} %{USER:ident} %{USER:auth} \[%{HTTPDATE:timestamp}\] "%{WORD:verb} %{NOTSPACE:request}(?: HTTP/%{NUMBER:httpversion})?" %{NUMBER:response} (?:%{NUMBER:bytes}|-) "%{DATA:referrer}" "%{DATA:agent}""#,
            10,
            "Apache Common Log Format",
            Standard,
        ),
        def(
            "Apache Combined Access Log",
            r#"%{IPORHOST:clientip} %{USER:ident} %{USER:auth} \[%{HTTPDATE:timestamp}\] "%{WORD:verb} %{NOTSPACE:request}(?: HTTP/%{NUMBER:httpversion})?" %{NUMBER:response} (?:%{NUMBER:bytes}|-) "%{DATA:referrer}" "%{DATA:agent}""#,
            11,
            "Apache HTTP combined log format (Common Log Format + referrer & user-agent)",
            Standard,
        ),
        def(
            "Apache Error Log",
            r#"\[%{HTTPDERROR_DATE:timestamp}\] \[%{LOGLEVEL:loglevel}\] \[client %{IPORHOST:clientip}\] %{GREEDYDATA:message}"#,
            12,
            "Apache HTTP error log format",
            Standard,
        )
        .with_custom("HTTPDERROR_DATE", "%{DAY} %{MONTH} %{MONTHDAY} %{TIME} %{YEAR}"),
        def(
            "Nginx Access Log",
            r#"%{IPORHOST:clientip} %{USER:ident} %{USER:auth} \[%{HTTPDATE:timestamp}\] "%{WORD:verb} %{NOTSPACE:request} HTTP/%{NUMBER:httpversion}" %{NUMBER:status} %{NUMBER:bytes} "%{DATA:referrer}" "%{DATA:agent}""#,
            12,
            "Nginx default access log (similar to Apache combined format)",
            Standard,
        ),
        def(
            "Nginx Error Log",
            r#"(?<timestamp>\d{4}\/\d{2}\/\d{2} %{TIME}) \[%{WORD:level}\] %{INT:pid}\#%{INT:tid}: \*%{INT:conn_id} %{GREEDYDATA:message}"#,
            13,
            "Nginx error log format",
            Standard,
        ),
        def(
            "IIS Access Log",
            r#"%{TIMESTAMP_ISO8601:timestamp} %{IPORHOST:clientip} %{WORD:method} %{URIPATH:request} %{NUMBER:status} %{NUMBER:bytes} %{NUMBER:time_taken}"#,
            14,
            "Microsoft IIS log format",
            Standard,
        ),
        // Mobile and application logs
        def(
            "Android Log",
            r#"(?<timestamp>\d{2}-\d{2} \d{2}:\d{2}:\d{2}\.\d{3})\s+%{NUMBER:pid}\s+%{NUMBER:tid}\s+%{WORD:level}\s+%{DATA:tag}\s*: %{GREEDYDATA:message}\r?$"#,
            14,
            "Android Logcat Format",
            Standard,
        )
        .with_custom("ANDROID_TIMESTAMP", r#"\d\d-\d\d \d\d:\d\d:\d\d.\d\d\d"#),
        def(
            "Java Log",
            r#"%{TIMESTAMP_ISO8601:timestamp} \[%{DATA:thread}\] %{LOGLEVEL:level} %{JAVAFILE:logger} - %{GREEDYDATA:message}"#,
            15,
            "Common Java Log Format",
            Standard,
        )
        .with_custom("JAVACLASS", r#"[a-zA-Z0-9-]+(?:\.[a-zA-Z0-9-]+)*"#)
        .with_custom("JAVAFILE", r#"(?:[A-Za-z0-9-]+\.)*[A-Za-z0-9-]+"#)
        .with_custom("LOGLEVEL", "(?:ERROR|WARN|INFO|DEBUG|TRACE)"),
        def(
            "Log4j",
            r#"%{TIMESTAMP_ISO8601:timestamp} %{LOGLEVEL:level} \[%{DATA:thread}\] %{JAVACLASS:logger} - %{GREEDYDATA:message}"#,
            16,
            "Log4j standard pattern",
            Standard,
        )
        .with_custom("JAVACLASS", r#"(?:[A-Za-z0-9-]+\.)*[A-Za-z0-9-$]+"#),
        def(
            "iOS Log",
            r#"%{TIMESTAMP_ISO8601:timestamp} %{LOGLEVEL:level}\s+%{GREEDYDATA:message} \[%{DATA:file}:%{INT:line}\]"#,
            17,
            "Common iOS log format",
            Standard,
        ),
        // Database logs
        def(
            "MySQL Error Log",
            r#"%{TIMESTAMP_ISO8601:timestamp} %{NUMBER:thread_id} \[%{WORD:level}\] %{GREEDYDATA:message}"#,
            20,
            "MySQL Error Log Format",
            Standard,
        ),
        def(
            "MySQL Slow Query Log",
            r#"# Time: %{TIMESTAMP_ISO8601:timestamp}\s+# User@Host: %{USERNAME:user}\[%{USERNAME:username}\] @ (?:%{HOSTNAME:clienthost}|%{IP:clientip}) \[[^]]*\]\s+# Query_time: %{NUMBER:query_time}\s+Lock_time: %{NUMBER:lock_time}\s+Rows_sent: %{NUMBER:rows_sent}\s+Rows_examined: %{NUMBER:rows_examined}\s+SET timestamp=%{NUMBER:mysql_timestamp};\s+%{GREEDYDATA:query}"#,
            21,
            "MySQL Slow Query Log Format",
            Standard,
        )
        .with_custom("USERNAME", "[a-zA-Z0-9._-]+"),
        def(
            "PostgreSQL Log",
            r#"%{TIMESTAMP_ISO8601:timestamp} %{TZ} %{USERNAME:user} %{WORD:database} %{USERNAME:pid} %{WORD:client_ip} %{NUMBER:session_id} %{WORD:session_line_num} %{GREEDYDATA:message}"#,
            22,
            "PostgreSQL Log Format",
            Standard,
        )
        .with_custom("USERNAME", "[a-zA-Z0-9._-]+"),
        def(
            "MongoDB Log",
            r#"%{TIMESTAMP_ISO8601:timestamp} %{WORD:severity} %{WORD:component} \[%{DATA:context}\] %{GREEDYDATA:message}"#,
            23,
            "MongoDB Log Format",
            Standard,
        ),
        def(
            "SQLite Log",
            r#"%{TIMESTAMP_ISO8601:timestamp} %{LOGLEVEL:level} %{GREEDYDATA:message}"#,
            24,
            "SQLite Log Format",
            Standard,
        ),
        def(
            "SQL Server Log",
            r#"%{TIMESTAMP_ISO8601:timestamp} %{WORD:spid} %{LOGLEVEL:severity} %{GREEDYDATA:message}"#,
            25,
            "Microsoft SQL Server Log Format",
            Standard,
        ),
        def(
            "PostgreSQL Error Log",
            r#"%{TIMESTAMP_ISO8601:timestamp} %{TZ} \[%{NUMBER:pid}\] %{WORD:user}@%{WORD:database} %{WORD:severity}: %{GREEDYDATA:message}"#,
            26,
            "PostgreSQL Error Log Format",
            Standard,
        ),
        def(
            "Oracle Alert Log",
            r#"%{DAY} %{MONTH} %{MONTHDAY} %{TIME} %{YEAR}\nALERT %{WORD:process}\(%{DATA:instance}\) \(%{WORD:host}\): %{GREEDYDATA:message}"#,
            27,
            "Oracle Database Alert Log Format",
            Standard,
        ),
        // Container and orchestration logs
        def(
            "Kubernetes Pod Log",
            r#"%{TIMESTAMP_ISO8601:timestamp} %{LOGLEVEL:level} %{GREEDYDATA:message}"#,
            30,
            "Kubernetes Pod Log Format",
            Standard,
        ),
        def(
            "Docker Log",
            r#"%{TIMESTAMP_ISO8601:timestamp} %{WORD:level} %{GREEDYDATA:message}"#,
            31,
            "Docker Log Format",
            Standard,
        ),
        def(
            "Kubernetes Events",
            r#"%{TIMESTAMP_ISO8601:timestamp} %{WORD:level} %{WORD:component} %{WORD:object_type}=%{NOTSPACE:object_name} %{GREEDYDATA:message}"#,
            32,
            "Kubernetes Events Log Format",
            Standard,
        ),
        // Security logs
        def(
            "Auth Log",
            r#"%{SYSLOGTIMESTAMP:timestamp} %{HOSTNAME:hostname} %{WORD:program}(?:\[%{POSINT:pid}\])?: %{GREEDYDATA:message}"#,
            40,
            "Linux Auth Log Format",
            Standard,
        ),
        def(
            "SSH Authentication",
            r#"%{SYSLOGTIMESTAMP:timestamp} %{HOSTNAME:hostname} sshd\[%{POSINT:pid}\]: %{DATA:status} %{WORD:auth_method} for( invalid user)? %{USERNAME:username} from %{IP:srcip}( port %{NUMBER:port})?( ssh%{NUMBER:ssh_version})?"#,
            41,
            "SSH Authentication Log Format",
            Standard,
        )
        .with_custom("USERNAME", "[a-zA-Z0-9._-]+"),
        def(
            "Firewall Log",
            r#"%{SYSLOGTIMESTAMP:timestamp} %{HOSTNAME:hostname} %{WORD:program}(?:\[%{POSINT:pid}\])?: %{GREEDYDATA:message}"#,
            42,
            "Firewall Log Format",
            Standard,
        ),
        def(
            "OWASP ModSecurity",
            r#"\[%{HTTPDERROR_DATE:timestamp}\] \[%{WORD:client}\] \[client %{IPORHOST:clientip}\] \[file "%{DATA:rule_file}"\] \[line "%{NUMBER:rule_line}"\] \[id "%{NUMBER:rule_id}"\] \[rev "%{NUMBER:rule_revision}"\] \[msg "%{DATA:rule_msg}"\] \[data "%{DATA:attack_data}"\] \[severity "%{WORD:severity}"\] (?:\[tag "%{DATA:tag}"\] )*\[hostname "%{DATA:hostname}"\] \[uri "%{DATA:uri}"\] \[unique_id "%{DATA:unique_id}"\]"#,
            45,
            "OWASP ModSecurity WAF Detailed Log Format",
            Security,
        )
        .with_custom("HTTPDERROR_DATE", "%{DAY} %{MONTH} %{MONTHDAY} %{TIME} %{YEAR}"),
        def(
            "Fail2Ban Log",
            r#"%{TIMESTAMP_ISO8601:timestamp} %{WORD:process}\s+\[%{NUMBER:pid}\]: %{LOGLEVEL:level}\s+\[%{WORD:jail}\] %{WORD:action}: %{IP:source_ip}"#,
            46,
            "Fail2Ban Log Format",
            Security,
        ),
        def(
            "Snort IDS Alert",
            r#"\[\*\*\] \[%{NUMBER:rule_id}:%{NUMBER:rule_revision}\] %{DATA:alert_message} \[\*\*\]\n\[Classification: %{DATA:classification}\] \[Priority: %{NUMBER:priority}\]\n%{TIMESTAMP_ISO8601:timestamp} %{IP:source_ip}:%{NUMBER:source_port} -> %{IP:destination_ip}:%{NUMBER:destination_port}"#,
            47,
            "Snort IDS Alert Log Format",
            Security,
        ),
        def(
            "Suricata EVE JSON",
            r#"\{"timestamp":"%{TIMESTAMP_ISO8601:timestamp}".*"event_type":"%{WORD:event_type}".*"src_ip":"%{IP:src_ip}".*"src_port":%{NUMBER:src_port}.*"dest_ip":"%{IP:dest_ip}".*"dest_port":%{NUMBER:dest_port}.*"proto":"%{WORD:protocol}".*(?:"alert":\{.*"signature":"%{DATA:alert_signature}".*"signature_id":%{NUMBER:signature_id}.*"category":"%{DATA:alert_category}".*\})?.*\}"#,
            48,
            "Suricata EVE JSON Log Format",
            Security,
        ),
        def(
            "OSSEC Alert",
            r#"\*\* Alert %{NUMBER:alert_id}.%{NUMBER:alert_sub_id}:%{SPACE}%{DATA:rule_description}\n%{TIMESTAMP_ISO8601:timestamp} %{DATA:hostname}->%{DATA:location}\nRule: %{NUMBER:rule_id} \(level %{NUMBER:level}\) -> '%{DATA:rule_name}'\n(?:Src IP: (?:%{IP:src_ip})\n)?(?:User: (?:%{DATA:user})\n)?%{GREEDYDATA:message}"#,
            49,
            "OSSEC HIDS Alert Log Format",
            Security,
        ),
        // Network equipment logs
        def(
            "Cisco IOS Log",
            r#"^<(?<pri>[0-9]+)>(?<time>[0-9]{1,2}:[0-9]{1,2}:[0-9]{1,2}):\s+\*?(?:%{CISCOTIMESTAMP:timestamp})?\s+(?:%{WORD:device})?:?\s+%{GREEDYDATA:message}$"#,
            50,
            "Cisco IOS Log Format",
            Standard,
        )
        .with_custom("CISCOTIMESTAMP", r#"%{MONTH} +%{MONTHDAY}(?: %{YEAR})? %{TIME}"#),
        def(
            "Juniper Log",
            r#"%{SYSLOGTIMESTAMP:timestamp} %{HOSTNAME:hostname} %{WORD:program}\[%{POSINT:pid}\]: %{GREEDYDATA:message}"#,
            51,
            "Juniper Network Device Log Format",
            Standard,
        ),
        def(
            "F5 BIG-IP Log",
            r#"%{SYSLOGTIMESTAMP:timestamp} %{HOSTNAME:hostname} %{WORD:program}(?:\[%{POSINT:pid}\])?: %{GREEDYDATA:message}"#,
            52,
            "F5 BIG-IP Load Balancer Log Format",
            Standard,
        ),
        // Message queue and broker logs
        def(
            "RabbitMQ Log",
            r#"%{TIMESTAMP_ISO8601:timestamp} \[%{WORD:level}\] %{GREEDYDATA:message}"#,
            60,
            "RabbitMQ Log Format",
            Standard,
        ),
        def(
            "Kafka Log",
            r#"\[%{TIMESTAMP_ISO8601:timestamp}\] %{WORD:level} %{GREEDYDATA:message} \(%{JAVACLASS:class}\)"#,
            61,
            "Kafka Log Format",
            Standard,
        )
        .with_custom("JAVACLASS", r#"(?:[A-Za-z0-9-]+\.)*[A-Za-z0-9-$]+"#),
        // Cache logs
        def(
            "Redis Log",
            r#"%{NUMBER:pid}:%{WORD:role} %{GREEDYDATA:message}"#,
            70,
            "Redis Log Format",
            Standard,
        ),
        def(
            "Memcached Log",
            r#"%{SYSLOGTIMESTAMP:timestamp} %{WORD:severity} %{GREEDYDATA:message}"#,
            71,
            "Memcached Log Format",
            Standard,
        ),
        // API gateway logs
        def(
            "AWS API Gateway",
            r#"%{TIMESTAMP_ISO8601:timestamp} %{UUID:request_id} %{WORD:http_method} %{URIPATH:uri_path} %{NUMBER:status_code} %{NUMBER:response_time} %{IP:source_ip}"#,
            80,
            "AWS API Gateway Log Format",
            Standard,
        )
        .with_custom(
            "UUID",
            "[a-fA-F0-9]{8}-[a-fA-F0-9]{4}-[a-fA-F0-9]{4}-[a-fA-F0-9]{4}-[a-fA-F0-9]{12}",
        ),
        def(
            "Kong API Gateway",
            r#"%{IP:client_ip} - %{USERNAME:user} \[%{HTTPDATE:timestamp}\] "%{WORD:method} %{URIPATH:uri_path} HTTP/%{NUMBER:http_version}" %{NUMBER:status_code} %{NUMBER:bytes} %{NUMBER:response_time}"#,
            81,
            "Kong API Gateway Log Format",
            Standard,
        )
        .with_custom("USERNAME", "[a-zA-Z0-9._-]+"),
        // Serverless logs
        def(
            "AWS Lambda Log",
            r#"START RequestId: %{UUID:request_id} Version: %{DATA:version}\nEND RequestId: %{UUID:request_id}\nREPORT RequestId: %{UUID:request_id}\s+Duration: %{NUMBER:duration} ms\s+Billed Duration: %{NUMBER:billed_duration} ms\s+Memory Size: %{NUMBER:memory_size} MB\s+Max Memory Used: %{NUMBER:max_memory_used} MB"#,
            90,
            "AWS Lambda Log Format",
            Standard,
        )
        .with_custom(
            "UUID",
            "[a-fA-F0-9]{8}-[a-fA-F0-9]{4}-[a-fA-F0-9]{4}-[a-fA-F0-9]{4}-[a-fA-F0-9]{12}",
        ),
        def(
            "Azure Function Log",
            r#"%{TIMESTAMP_ISO8601:timestamp} %{WORD:level} \[%{DATA:function_name}\] %{GREEDYDATA:message}"#,
            91,
            "Azure Function Log Format",
            Standard,
        ),
        // Load balancer logs
        def(
            "HAProxy Log",
            r#"%{IP:client_ip}:%{INT:client_port} \[%{HTTPDATE:timestamp}\] %{NOTSPACE:frontend_name} %{NOTSPACE:backend_name}/%{NOTSPACE:server_name} %{INT:time_request}/%{INT:time_queue}/%{INT:time_backend_connect}/%{INT:time_backend_response}/%{INT:time_duration} %{INT:status_code} %{INT:bytes_read} %{NOTSPACE:captured_request_cookie} %{NOTSPACE:captured_response_cookie} %{NOTSPACE:termination_state} %{INT:actconn}/%{INT:feconn}/%{INT:beconn}/%{INT:srvconn}/%{INT:retries} %{INT:srv_queue}/%{INT:backend_queue} \{"%{DATA:captured_request_headers}"\} \{"%{DATA:captured_response_headers}"\} "%{WORD:http_method} %{URIPATHPARAM:uri_path} HTTP/%{NUMBER:http_version}""#,
            100,
            "HAProxy Log Format",
            Standard,
        ),
        def(
            "AWS ELB Log",
            r#"%{TIMESTAMP_ISO8601:timestamp} %{NOTSPACE:elb_name} %{IP:client_ip}:%{INT:client_port} %{IP:backend_ip}:%{INT:backend_port} %{NUMBER:request_processing_time} %{NUMBER:backend_processing_time} %{NUMBER:response_processing_time} %{INT:status_code} %{INT:backend_status_code} %{INT:received_bytes} %{INT:sent_bytes} "%{WORD:http_method} %{URIPATHPARAM:uri_path} HTTP/%{NUMBER:http_version}" "%{DATA:user_agent}" %{NOTSPACE:ssl_cipher} %{NOTSPACE:ssl_protocol}"#,
            101,
            "AWS Elastic Load Balancer Log Format",
            Standard,
        ),
        // Cloud provider logs
        def(
            "AWS S3 Access Log",
            r#"%{WORD:bucket_owner} %{NOTSPACE:bucket} \[%{HTTPDATE:timestamp}\] (?:-|%{IP:client_ip}) (?:-|%{NOTSPACE:requester}) %{NOTSPACE:request_id} %{NOTSPACE:operation} (?:-|%{NOTSPACE:key}) (?:-|"%{DATA:request_uri}") (?:-|%{INT:http_status}) (?:-|%{NOTSPACE:error_code}) (?:-|%{INT:bytes_sent}) (?:-|%{INT:object_size}) (?:-|%{INT:total_time}) (?:-|%{INT:turn_around_time}) "(?:-|%{DATA:referrer})" "(?:-|%{DATA:user_agent})" (?:-|%{NOTSPACE:version_id})"#,
            110,
            "AWS S3 Access Log Format",
            Cloud,
        ),
        def(
            "AWS CloudFront Log",
            "(?<timestamp>%{YEAR}-%{MONTHNUM}-%{MONTHDAY}\\t%{TIME})\\t%{WORD:edge_location}\\t(?:-|%{INT:bytes_sent})\\t%{IPORHOST:client_ip}\\t%{WORD:http_method}\\t%{HOSTNAME:domain}\\t%{NOTSPACE:uri_path}\\t(?:(?:000)|%{INT:http_status})\\t(?:-|%{DATA:referrer})\\t%{DATA:user_agent}\\t(?:-|%{DATA:query_string})\\t(?:-|%{DATA:cookie})\\t%{WORD:edge_result_type}\\t%{NOTSPACE:request_id}\\t%{HOSTNAME:host}\\t%{WORD:protocol}\\t(?:-|%{INT:bytes_received})\\t%{NUMBER:time_taken}\\t(?:-|%{IP:forwarded_for})\\t(?:-|%{DATA:ssl_protocol})\\t(?:-|%{NOTSPACE:ssl_cipher})\\t%{WORD:edge_response_result_type}",
            111,
            "AWS CloudFront Log Format",
            Cloud,
        ),
        def(
            "AWS CloudTrail Log",
            r#"%{TIMESTAMP_ISO8601:timestamp} %{NOTSPACE:logger} \[%{DATA:thread}\] %{LOGLEVEL:level} %{JAVACLASS:class} - %{GREEDYDATA:message}"#,
            112,
            "AWS CloudTrail Log Format",
            Cloud,
        )
        .with_custom("JAVACLASS", r#"(?:[A-Za-z0-9-]+\.)*[A-Za-z0-9-$]+"#),
        def(
            "AWS CloudWatch Log",
            r#"%{TIMESTAMP_ISO8601:timestamp} %{GREEDYDATA:message}"#,
            113,
            "AWS CloudWatch Log Format",
            Cloud,
        ),
        def(
            "Azure Activity Log",
            r#"%{TIMESTAMP_ISO8601:timestamp} %{WORD:level} %{NOTSPACE:resource_id} %{WORD:operation_name} %{GREEDYDATA:message}"#,
            114,
            "Azure Activity Log Format",
            Cloud,
        ),
        def(
            "GCP Cloud Logging",
            r#"%{TIMESTAMP_ISO8601:timestamp} %{LOGLEVEL:severity} %{DATA:project_id} %{DATA:log_id} %{GREEDYDATA:message}"#,
            115,
            "Google Cloud Platform Logging Format",
            Cloud,
        ),
        def(
            "Google Cloud Run",
            r#"%{TIMESTAMP_ISO8601:timestamp} %{LOGLEVEL:severity} %{DATA:project_id} %{DATA:service_name} %{DATA:revision} %{DATA:trace_id} %{GREEDYDATA:message}"#,
            116,
            "Google Cloud Run Log Format",
            Cloud,
        ),
        def(
            "Azure App Service",
            r#"%{TIMESTAMP_ISO8601:timestamp} %{WORD:app_name} %{LOGLEVEL:level} %{DATA:instance_id} %{GREEDYDATA:message}"#,
            117,
            "Azure App Service Log Format",
            Cloud,
        ),
        // Caching and CDN logs
        def(
            "Varnish Cache Log",
            r#"%{TIMESTAMP_ISO8601:timestamp} %{SYSLOGHOST:hostname} varnishd\[%{POSINT:pid}\]: %{GREEDYDATA:message}"#,
            120,
            "Varnish Cache Log Format",
            Standard,
        ),
        def(
            "Cloudflare Log",
            r#"%{IP:client_ip} - %{USERNAME:user} \[%{HTTPDATE:timestamp}\] "%{WORD:method} %{URIPATH:uri_path} HTTP/%{NUMBER:http_version}" %{NUMBER:status_code} %{NUMBER:bytes} "%{DATA:referrer}" "%{DATA:user_agent}" %{UUID:ray_id}"#,
            121,
            "Cloudflare CDN Log Format",
            Standard,
        )
        .with_custom("USERNAME", "[a-zA-Z0-9._-]+")
        .with_custom(
            "UUID",
            "[a-fA-F0-9]{8}-[a-fA-F0-9]{4}-[a-fA-F0-9]{4}-[a-fA-F0-9]{4}-[a-fA-F0-9]{12}",
        ),
        // Application performance monitoring
        def(
            "New Relic Log",
            r#"%{TIMESTAMP_ISO8601:timestamp} %{LOGLEVEL:level}: %{GREEDYDATA:message}"#,
            130,
            "New Relic APM Log Format",
            Standard,
        ),
        def(
            "Datadog Agent Log",
            r#"%{TIMESTAMP_ISO8601:timestamp} %{WORD:level} \| %{WORD:service} \| %{GREEDYDATA:message}"#,
            131,
            "Datadog Agent Log Format",
            Standard,
        ),
        // CI/CD logs
        def(
            "Jenkins Build Log",
            r#"%{TIMESTAMP_ISO8601:timestamp} %{LOGLEVEL:level} %{GREEDYDATA:message}"#,
            140,
            "Jenkins CI/CD Build Log Format",
            Standard,
        ),
        def(
            "GitHub Actions Log",
            r#"%{TIMESTAMP_ISO8601:timestamp} %{WORD:workflow} %{WORD:job} %{GREEDYDATA:message}"#,
            141,
            "GitHub Actions Log Format",
            Standard,
        ),
        // Mail server logs
        def(
            "Postfix Log",
            r#"%{SYSLOGTIMESTAMP:timestamp} %{HOSTNAME:hostname} postfix/%{WORD:process}\[%{POSINT:pid}\]: %{POSTFIX_QUEUEID:queue_id}:? %{GREEDYDATA:message}"#,
            150,
            "Postfix Mail Server Log Format",
            Standard,
        )
        .with_custom("POSTFIX_QUEUEID", "([0-9A-F]{6,}|NOQUEUE)"),
        def(
            "Sendmail Log",
            r#"%{SYSLOGTIMESTAMP:timestamp} %{HOSTNAME:hostname} sendmail\[%{POSINT:pid}\]: %{GREEDYDATA:message}"#,
            151,
            "Sendmail Mail Server Log Format",
            Standard,
        ),
        // File storage logs
        def(
            "NFS Log",
            r#"%{SYSLOGTIMESTAMP:timestamp} %{HOSTNAME:hostname} %{WORD:program}\[%{POSINT:pid}\]: %{GREEDYDATA:message}"#,
            160,
            "Network File System (NFS) Log Format",
            Standard,
        ),
        def(
            "SMB Log",
            r#"%{SYSLOGTIMESTAMP:timestamp} %{HOSTNAME:hostname} %{WORD:program}\[%{POSINT:pid}\]: %{GREEDYDATA:message}"#,
            161,
            "Server Message Block (SMB) Log Format",
            Standard,
        ),
        // Blockchain and cryptocurrency
        def(
            "Ethereum Node Log",
            r#"%{TIMESTAMP_ISO8601:timestamp}\s+%{LOGLEVEL:level}\s+\[%{DATA:module}\]\s+%{GREEDYDATA:message}"#,
            185,
            "Ethereum Node Log Format",
            Blockchain,
        ),
        def(
            "Bitcoin Core Log",
            r#"%{TIMESTAMP_ISO8601:timestamp} %{LOGLEVEL:level} %{GREEDYDATA:message}"#,
            186,
            "Bitcoin Core Node Log Format",
            Blockchain,
        ),
        def(
            "Hyperledger Fabric Log",
            r#"%{TIMESTAMP_ISO8601:timestamp} %{LOGLEVEL:level} %{DATA:peer} \[%{DATA:chaincode}\] %{GREEDYDATA:message}"#,
            187,
            "Hyperledger Fabric Blockchain Log Format",
            Blockchain,
        ),
        // Infrastructure as code and configuration management
        def(
            "Terraform Log",
            r#"%{TIMESTAMP_ISO8601:timestamp} \[%{LOGLEVEL:level}\] %{GREEDYDATA:message}"#,
            188,
            "Terraform IaC Log Format",
            Infrastructure,
        ),
        def(
            "Ansible Log",
            r#"%{DATA:task}\s+\[%{DATA:host}\]\s+\(%{WORD:status}\):\s+%{GREEDYDATA:message}"#,
            189,
            "Ansible Configuration Management Log Format",
            Infrastructure,
        ),
        def(
            "Puppet Log",
            r#"%{TIMESTAMP_ISO8601:timestamp} %{LOGLEVEL:level} %{DATA:source} %{GREEDYDATA:message}"#,
            190,
            "Puppet Configuration Management Log Format",
            Infrastructure,
        ),
        def(
            "Chef Log",
            r#"\[%{TIMESTAMP_ISO8601:timestamp}\] %{LOGLEVEL:level}: %{GREEDYDATA:message}"#,
            191,
            "Chef Configuration Management Log Format",
            Infrastructure,
        ),
        // Streaming and messaging
        def(
            "Apache Kafka Connect Log",
            r#"\[%{TIMESTAMP_ISO8601:timestamp}\] %{LOGLEVEL:level} %{GREEDYDATA:message} \(%{JAVACLASS:class}\)"#,
            192,
            "Apache Kafka Connect Log Format",
            Streaming,
        )
        .with_custom("JAVACLASS", r#"(?:[A-Za-z0-9-]+\.)*[A-Za-z0-9-$]+"#),
        def(
            "Apache Pulsar Log",
            r#"%{TIMESTAMP_ISO8601:timestamp} \[%{DATA:thread}\] %{LOGLEVEL:level} %{JAVACLASS:class} - %{GREEDYDATA:message}"#,
            193,
            "Apache Pulsar Messaging Log Format",
            Streaming,
        )
        .with_custom("JAVACLASS", r#"(?:[A-Za-z0-9-]+\.)*[A-Za-z0-9-$]+"#),
        def(
            "NATS Server Log",
            r#"\[%{NUMBER:timestamp}\] \[%{LOGLEVEL:level}\] %{GREEDYDATA:message}"#,
            194,
            "NATS Messaging Server Log Format",
            Streaming,
        ),
        // Generic catch-alls, matched last
        def(
            "Generic Timestamped Log",
            r#"%{TIMESTAMP_ISO8601:timestamp} %{LOGLEVEL:level} %{GREEDYDATA:message}"#,
            200,
            "Generic timestamp + level + message pattern",
            Standard,
        ),
        def(
            "Generic Structured Log",
            r#"(?:%{TIMESTAMP_ISO8601:timestamp})?\s*\{.*"level":\s*"%{LOGLEVEL:level}".*"message":\s*"%{DATA:message}".*\}"#,
            201,
            "Generic JSON structured log pattern",
            Standard,
        ),
        def(
            "Syslog Timestamped",
            r#"%{SYSLOGTIMESTAMP:timestamp} %{GREEDYDATA:message}"#,
            202,
            "Basic syslog timestamp + message pattern",
            Standard,
        ),
        def(
            "Basic Line with Timestamp",
            r#"\[?%{TIMESTAMP_ISO8601:timestamp}\]?\s+%{GREEDYDATA:message}"#,
            210,
            "Basic line with ISO8601 timestamp pattern",
            Standard,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn names_are_unique() {
        let patterns = default_patterns();
        let names: HashSet<&str> = patterns.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names.len(), patterns.len());
    }

    #[test]
    fn priorities_stay_in_reserved_band() {
        for pattern in default_patterns() {
            assert!(
                (1..=220).contains(&pattern.priority),
                "{} has priority {}",
                pattern.name,
                pattern.priority
            );
        }
    }

    #[test]
    fn catch_alls_have_the_highest_priorities() {
        let patterns = default_patterns();
        let max_specific = patterns
            .iter()
            .filter(|p| !p.name.starts_with("Generic") && !p.name.starts_with("Basic") && p.name != "Syslog Timestamped")
            .map(|p| p.priority)
            .max()
            .unwrap();
        let min_catchall = patterns
            .iter()
            .filter(|p| p.name.starts_with("Generic") || p.name.starts_with("Basic") || p.name == "Syslog Timestamped")
            .map(|p| p.priority)
            .min()
            .unwrap();
        assert!(min_catchall > max_specific);
    }

    #[test]
    fn every_pattern_has_a_description() {
        for pattern in default_patterns() {
            assert!(!pattern.description.is_empty(), "{}", pattern.name);
        }
    }
}
